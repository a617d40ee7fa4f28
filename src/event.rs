use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;

/// Terminal events.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Event {
    /// Advance application state (animation frames).
    Update,
    /// Redraw the interface.
    Render,
    Key(KeyEvent),
    Mouse(MouseEvent),
}

/// Terminal event handler.
///
/// A background task multiplexes crossterm input with the update and render
/// clocks onto a single channel; the task exits when the receiving side is
/// dropped.
#[derive(Debug)]
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new() -> Self {
        const UPDATE_RATE: f64 = 30.0;
        const RENDER_RATE: f64 = 30.0;

        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut update_interval =
                tokio::time::interval(Duration::from_secs_f64(1.0 / UPDATE_RATE));
            let mut render_interval =
                tokio::time::interval(Duration::from_secs_f64(1.0 / RENDER_RATE));
            loop {
                let crossterm_event = reader.next().fuse();
                let event = tokio::select! {
                    _ = sender.closed() => break,
                    _ = update_interval.tick() => Some(Event::Update),
                    _ = render_interval.tick() => Some(Event::Render),
                    Some(Ok(event)) = crossterm_event => match event {
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                        _ => None,
                    },
                };
                if let Some(event) = event {
                    if sender.send(event).is_err() {
                        break;
                    }
                }
            }
        });
        Self { receiver }
    }

    /// Receives the next event, waiting until one is available.
    pub async fn next(&mut self) -> Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("event channel closed"))
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
