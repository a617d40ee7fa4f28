use anyhow::Result;
use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::{palette::tailwind, Modifier, Style, Stylize},
    text::Text,
    widgets::{
        Block, Cell, Paragraph, Row, Scrollbar, ScrollbarState, StatefulWidget, Table, TableState,
        Widget, Wrap,
    },
};
use reverse_geocoder::ReverseGeocoder;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;

use super::{satellites::SatellitesState, world_map::WorldMapState};

/// Detail table for the satellite selected on the map.
pub struct ObjectInformation<'a> {
    pub satellites_state: &'a SatellitesState,
    pub world_map_state: &'a WorldMapState,
}

pub struct ObjectInformationState {
    pub table_state: TableState,
    pub table_size: usize,
    pub area: Rect,
    geocoder: ReverseGeocoder,
}

impl Default for ObjectInformationState {
    fn default() -> Self {
        Self {
            table_state: Default::default(),
            table_size: Default::default(),
            area: Default::default(),
            geocoder: ReverseGeocoder::new(),
        }
    }
}

impl StatefulWidget for ObjectInformation<'_> {
    type State = ObjectInformationState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.area = area;

        let block = Block::bordered().title("Satellite details".blue());
        let selected = self
            .world_map_state
            .selected_object
            .and_then(|index| self.satellites_state.items.get(index));

        let Some(item) = selected else {
            let paragraph = Paragraph::new("No satellite selected".dark_gray())
                .block(block)
                .centered()
                .wrap(Wrap { trim: true });
            paragraph.render(area, buf);
            return;
        };

        let satellite = &item.satellite;
        let (lat, lon) = item.animation.marker();

        let result = state.geocoder.search((lat, lon));
        let city = result.record.name.clone();
        let country = isocountry::CountryCode::for_alpha2(&result.record.cc)
            .map(|code| code.name())
            .unwrap_or("unknown");

        let mut items = vec![
            ("Name", satellite.name().to_string()),
            ("Kind", satellite.kind().to_string()),
            ("Latitude", format_latitude(lat)),
            ("Longitude", format_longitude(lon)),
        ];
        if let Some(position) = satellite.current_position() {
            items.push(("Altitude", format!("{:.1} km", position.altitude)));
            let timestamp = position
                .timestamp()
                .map(|t| t.to_string())
                .unwrap_or_else(|| position.timestamp.clone());
            items.push(("Timestamp", timestamp));
        }
        if let Some(launch_date) = satellite.launch_date() {
            items.push(("Launched", launch_date.to_string()));
        }
        items.push(("Details", satellite.details_url().to_string()));
        items.push(("Location", format!("{}, {}", city, country)));
        state.table_size = items.len();

        let inner_area = area.inner(Margin::new(1, 1));

        let max_key_width = items
            .iter()
            .map(|(key, _)| key.width() as u16)
            .max()
            .unwrap_or_default();

        let widths = [Constraint::Max(max_key_width), Constraint::Fill(1)];
        let [_left, right] = Layout::horizontal(widths)
            .areas(inner_area)
            .map(|rect| rect.width);
        let right = right.saturating_sub(1);

        let rows = items.iter().enumerate().map(|(i, (key, value))| {
            let color = match i % 2 {
                0 => tailwind::SLATE.c950,
                _ => tailwind::SLATE.c900,
            };
            let value = truncate_to_width(value, right);
            Row::new([
                Cell::from(Text::from(key.bold())),
                Cell::from(Text::from(value)),
            ])
            .style(Style::new().bg(color))
            .height(1)
        });

        let table = Table::new(rows, widths)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        StatefulWidget::render(table, area, buf, &mut state.table_state);

        let inner_area = area.inner(Margin::new(0, 1));
        let mut scrollbar_state =
            ScrollbarState::new(state.table_size.saturating_sub(inner_area.height as usize))
                .position(state.table_state.offset());
        Scrollbar::default().render(inner_area, buf, &mut scrollbar_state);
    }
}

pub fn handle_mouse_events(event: MouseEvent, app: &mut App) -> Result<()> {
    let inner_area = app.object_information_state.area.inner(Margin::new(1, 1));
    if !inner_area.contains(Position::new(event.column, event.row)) {
        app.object_information_state.table_state.select(None);
        return Ok(());
    }

    match event.kind {
        MouseEventKind::ScrollDown => {
            let max_offset = app
                .object_information_state
                .table_size
                .saturating_sub(inner_area.height as usize);
            *app.object_information_state.table_state.offset_mut() =
                (app.object_information_state.table_state.offset() + 1).min(max_offset);
        }
        MouseEventKind::ScrollUp => {
            *app.object_information_state.table_state.offset_mut() = app
                .object_information_state
                .table_state
                .offset()
                .saturating_sub(1);
        }
        _ => {}
    }
    let index =
        (event.row - inner_area.y) as usize + app.object_information_state.table_state.offset();
    app.object_information_state
        .table_state
        .select(Some(index));

    Ok(())
}

/// Shortens a value to the column width with a `...` suffix. Values come
/// straight from the input document, so truncation walks chars and display
/// widths rather than slicing at a byte index.
fn truncate_to_width(value: &str, max_width: u16) -> String {
    if value.width() as u16 <= max_width {
        return value.to_string();
    }
    let budget = (max_width as usize).saturating_sub(3);
    let mut width = 0;
    let mut truncated = String::new();
    for c in value.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > budget {
            break;
        }
        width += char_width;
        truncated.push(c);
    }
    truncated + "..."
}

fn format_longitude(longitude: f64) -> String {
    if longitude >= 0.0 {
        format!("{:.5}°E", longitude)
    } else {
        format!("{:.5}°W", longitude.abs())
    }
}

fn format_latitude(latitude: f64) -> String {
    if latitude >= 0.0 {
        format!("{:.5}°N", latitude)
    } else {
        format!("{:.5}°S", latitude.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_wide_values_on_char_boundaries() {
        // Multibyte names and URLs must not be sliced mid-character.
        let value = "üüüüüüüüüüüüüüüüüüüü";
        let truncated = truncate_to_width(value, 10);
        assert!(truncated.ends_with("..."));
        assert!(truncated.width() <= 10);

        let url = "https://example.org/satellitenübersicht/übersichtsseite";
        let truncated = truncate_to_width(url, 20);
        assert!(truncated.ends_with("..."));
        assert!(truncated.width() <= 20);

        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("exact", 5), "exact");
    }

    #[test]
    fn formats_signed_coordinates() {
        assert_eq!(format_latitude(51.47783), "51.47783°N");
        assert_eq!(format_latitude(-33.85678), "33.85678°S");
        assert_eq!(format_longitude(-0.00139), "0.00139°W");
        assert_eq!(format_longitude(151.21527), "151.21527°E");
    }
}
