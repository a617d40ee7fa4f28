use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::{
    app::{App, Config},
    event::{Event, EventHandler},
    tui::Tui,
    widgets::{object_information, satellites, world_map},
};

pub mod animation;
pub mod app;
pub mod event;
pub mod satellite;
pub mod source;
pub mod track;
pub mod tui;
pub mod widgets;

/// Displays satellite positions and their predicted tracks on a world map.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// URL or path of the satellite document
    #[arg(long, default_value = "satellites.json")]
    source: String,

    /// Milliseconds between animation frames
    #[arg(long, default_value_t = 500)]
    interval_ms: u64,

    /// Extrapolated track points appended beyond the last predicted pass
    #[arg(long, default_value_t = 5)]
    steps: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Load the satellite document before entering the alternate screen.
    let mut app = App::new(Config {
        source: args.source,
        interval: Duration::from_millis(args.interval_ms),
        steps: args.steps,
    });
    app.load();

    // Initialize the terminal user interface.
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    let events = EventHandler::new();
    let mut tui = Tui::new(terminal, events);
    tui.init()?;

    // Start the main loop.
    while app.running {
        match tui.events.next().await? {
            Event::Update => app.tick(),
            Event::Render => tui.render(&mut app)?,
            Event::Key(event) => handle_key_events(event, &mut app)?,
            Event::Mouse(event) => handle_mouse_events(event, &mut app)?,
        }
    }

    // Exit the user interface.
    tui.exit()?;
    Ok(())
}

fn handle_key_events(event: KeyEvent, app: &mut App) -> Result<()> {
    match event.code {
        // Exit application on `ESC`
        KeyCode::Esc => {
            app.quit();
        }
        // Exit application on `Ctrl-C`
        KeyCode::Char('c') => {
            if event.modifiers == KeyModifiers::CONTROL {
                app.quit();
            }
        }
        // Reload the satellite document
        KeyCode::Char('r') => {
            app.load();
        }
        _ => {}
    }
    Ok(())
}

fn handle_mouse_events(event: MouseEvent, app: &mut App) -> Result<()> {
    world_map::handle_mouse_events(event, app)?;
    object_information::handle_mouse_events(event, app)?;
    satellites::handle_mouse_events(event, app)?;
    Ok(())
}
