use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Text,
    widgets::{
        Block, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarState, StatefulWidget,
        Widget, Wrap,
    },
};

use crate::{
    animation::Animation,
    app::{App, Config},
    satellite::Satellite,
    source::LoadError,
};

/// Checkbox list of the loaded satellites. When the last load failed, the
/// panel shows the diagnostic instead of a list.
#[derive(Default)]
pub struct Satellites;

#[derive(Default)]
pub struct SatellitesState {
    pub items: Vec<Item>,
    pub load_error: Option<String>,

    pub list_state: ListState,
    pub area: Rect,
}

/// One displayed satellite with its own animation driver. Drivers are never
/// shared: hiding a satellite stops its driver, showing it again starts a
/// fresh one.
pub struct Item {
    pub satellite: Satellite,
    pub animation: Animation,
    pub visible: bool,
}

impl Item {
    fn new(satellite: Satellite, config: &Config) -> Self {
        let animation = Animation::new(satellite.track(config.steps), config.interval);
        Self {
            satellite,
            animation,
            visible: true,
        }
    }
}

impl SatellitesState {
    /// Replaces the displayed set after a successful load.
    pub fn replace(&mut self, satellites: Vec<Satellite>, config: &Config) {
        self.items = satellites
            .into_iter()
            .map(|satellite| Item::new(satellite, config))
            .collect();
        self.load_error = None;
        self.list_state = ListState::default();
    }

    /// Clears the display after a failed load; the error stays visible until
    /// the next successful load.
    pub fn fail(&mut self, error: &LoadError) {
        for item in &mut self.items {
            item.animation.stop();
        }
        self.items.clear();
        self.load_error = Some(error.to_string());
        self.list_state = ListState::default();
    }

    /// Shows or hides a satellite. Hiding stops the animation driver so it
    /// never ticks again; showing starts a new driver from the beginning of
    /// the track.
    pub fn toggle(&mut self, index: usize, config: &Config) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        if item.visible {
            item.visible = false;
            item.animation.stop();
        } else {
            item.visible = true;
            item.animation = Animation::new(item.satellite.track(config.steps), config.interval);
        }
    }
}

impl StatefulWidget for Satellites {
    type State = SatellitesState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.area = area;

        let block = Block::bordered().title("Satellites".blue());

        if let Some(error) = &state.load_error {
            let paragraph = Paragraph::new(error.clone().red())
                .block(block)
                .wrap(Wrap { trim: true });
            paragraph.render(area, buf);
            return;
        }

        let items = state.items.iter().map(|item| {
            let style = if item.visible {
                Style::default().fg(Color::White)
            } else {
                Style::default()
            };
            let text = if item.visible {
                format!("✓ {}", item.satellite.name())
            } else {
                format!("☐ {}", item.satellite.name())
            };
            ListItem::new(Text::styled(text, style))
        });

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        StatefulWidget::render(list, area, buf, &mut state.list_state);

        let inner_area = area.inner(Margin::new(0, 1));
        let mut scrollbar_state =
            ScrollbarState::new(state.items.len().saturating_sub(inner_area.height as usize))
                .position(state.list_state.offset());
        Scrollbar::default().render(area, buf, &mut scrollbar_state);
    }
}

pub fn handle_mouse_events(event: MouseEvent, app: &mut App) -> Result<()> {
    let inner_area = app.satellites_state.area.inner(Margin::new(1, 1));
    if !inner_area.contains(Position::new(event.column, event.row)) {
        app.satellites_state.list_state.select(None);
        return Ok(());
    }

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = app.satellites_state.list_state.selected() {
                app.satellites_state.toggle(index, &app.config);
                if app.world_map_state.selected_object == Some(index) {
                    app.world_map_state.selected_object = None;
                }
            }
        }
        MouseEventKind::ScrollDown => {
            let max_offset = app
                .satellites_state
                .items
                .len()
                .saturating_sub(inner_area.height as usize);
            *app.satellites_state.list_state.offset_mut() =
                (app.satellites_state.list_state.offset() + 1).min(max_offset);
        }
        MouseEventKind::ScrollUp => {
            *app.satellites_state.list_state.offset_mut() =
                app.satellites_state.list_state.offset().saturating_sub(1);
        }
        _ => {}
    }
    let row = (event.row - inner_area.y) as usize + app.satellites_state.list_state.offset();
    let index = if row < app.satellites_state.items.len() {
        Some(row)
    } else {
        None
    };
    app.satellites_state.list_state.select(index);

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use ureq::serde_json;

    fn config() -> Config {
        Config {
            source: "satellites.json".into(),
            interval: Duration::ZERO,
            steps: 3,
        }
    }

    fn satellite() -> Satellite {
        serde_json::from_str(
            r#"{
                "name": "ISS (ZARYA)",
                "details_url": "https://example.org/iss",
                "current_position": {
                    "lat": 10.0, "lon": 20.0, "altitude": 420.0,
                    "timestamp": "2024-11-10T12:00:00Z"
                },
                "future_passes": [{"lat": 11.0, "lon": 22.0}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn hiding_stops_the_driver_and_showing_restarts_it() {
        let config = config();
        let mut state = SatellitesState::default();
        state.replace(vec![satellite()], &config);

        state.items[0].animation.step();
        state.items[0].animation.step();
        assert_eq!(state.items[0].animation.trail().len(), 2);

        state.toggle(0, &config);
        assert!(!state.items[0].visible);
        assert!(state.items[0].animation.is_stopped());

        state.toggle(0, &config);
        assert!(state.items[0].visible);
        assert!(!state.items[0].animation.is_stopped());
        assert_eq!(state.items[0].animation.trail().len(), 1);
    }

    #[test]
    fn failed_load_clears_items_and_keeps_the_error() {
        let config = config();
        let mut state = SatellitesState::default();
        state.replace(vec![satellite()], &config);

        state.fail(&LoadError::Malformed("missing `satellites` array".into()));
        assert!(state.items.is_empty());
        assert!(state.load_error.as_deref().unwrap().contains("malformed"));

        state.replace(vec![satellite()], &config);
        assert!(state.load_error.is_none());
        assert_eq!(state.items.len(), 1);
    }
}
