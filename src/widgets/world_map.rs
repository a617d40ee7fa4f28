use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Stylize},
    widgets::{
        canvas::{Canvas, Context, Line, Map, MapResolution},
        Block, StatefulWidget, Widget,
    },
};

use crate::app::App;

use super::satellites::SatellitesState;

/// World map canvas showing every visible satellite's animated marker and the
/// growing trail behind it.
pub struct WorldMap<'a> {
    pub satellites_state: &'a SatellitesState,
    pub satellite_symbol: String,
    pub trail_color: Color,
}

#[derive(Default)]
pub struct WorldMapState {
    pub selected_object: Option<usize>,
    pub hovered_object: Option<usize>,
    pub inner_area: Rect,
}

impl WorldMap<'_> {
    fn render_block(&self, area: Rect, buf: &mut Buffer, state: &mut WorldMapState) {
        let block = Block::bordered().title("World map".blue());
        state.inner_area = block.inner(area);
        block.render(area, buf);
    }

    fn render_bottom_layer(&self, buf: &mut Buffer, state: &mut WorldMapState) {
        let bottom_layer = Canvas::default()
            .paint(|ctx| {
                // Draw the world map
                ctx.draw(&Map {
                    color: Color::Gray,
                    resolution: MapResolution::High,
                });

                // Draw each visible satellite's trail and marker
                for (index, item) in self.satellites_state.items.iter().enumerate() {
                    if !item.visible {
                        continue;
                    }
                    let dimmed =
                        state.selected_object.is_some() && state.selected_object != Some(index);
                    let trail_color = if dimmed {
                        Color::DarkGray
                    } else {
                        self.trail_color
                    };
                    draw_trail(ctx, item.animation.trail(), trail_color);

                    let label = if dimmed {
                        self.satellite_symbol.clone().red()
                            + format!(" {}", item.satellite.name()).dark_gray()
                    } else {
                        self.satellite_symbol.clone().light_red()
                            + format!(" {}", item.satellite.name()).white()
                    };
                    let (lat, lon) = item.animation.marker();
                    ctx.print(lon, lat, label);
                }
            })
            .x_bounds([-180.0, 180.0])
            .y_bounds([-90.0, 90.0]);

        bottom_layer.render(state.inner_area, buf);
    }

    fn render_top_layer(&self, buf: &mut Buffer, state: &mut WorldMapState) {
        let top_layer = Canvas::default()
            .paint(|ctx| {
                if let Some(index) = state.selected_object {
                    let Some(item) = self.satellites_state.items.get(index) else {
                        return;
                    };
                    let (lat, lon) = item.animation.marker();
                    ctx.print(
                        lon,
                        lat,
                        self.satellite_symbol.clone().light_green().slow_blink()
                            + format!(" {}", item.satellite.name()).white(),
                    );
                } else if let Some(index) = state.hovered_object {
                    let Some(item) = self.satellites_state.items.get(index) else {
                        return;
                    };
                    let (lat, lon) = item.animation.marker();
                    ctx.print(
                        lon,
                        lat,
                        self.satellite_symbol.clone().light_red().reversed()
                            + " ".into()
                            + item.satellite.name().to_string().white().reversed(),
                    );
                }
            })
            .x_bounds([-180.0, 180.0])
            .y_bounds([-90.0, 90.0]);

        top_layer.render(state.inner_area, buf);
    }
}

impl StatefulWidget for WorldMap<'_> {
    type State = WorldMapState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        self.render_block(area, buf, state);
        self.render_bottom_layer(buf, state);
        self.render_top_layer(buf, state);
    }
}

/// Draws the trail polyline, splitting segments that cross the international
/// date line at ±180° instead of drawing them across the whole map.
fn draw_trail(ctx: &mut Context, trail: &[(f64, f64)], color: Color) {
    for window in trail.windows(2) {
        let (y1, x1) = window[0];
        let (y2, x2) = window[1];
        if (x1 - x2).abs() >= 180.0 {
            let x_edge = if x1 > 0.0 { 180.0 } else { -180.0 };
            ctx.draw(&Line::new(x1, y1, x_edge, y2, color));
            ctx.draw(&Line::new(-x_edge, y1, x2, y2, color));
            continue;
        }
        if (y1 - y2).abs() >= 90.0 {
            continue;
        }
        ctx.draw(&Line::new(x1, y1, x2, y2, color));
    }
}

pub fn handle_mouse_events(event: MouseEvent, app: &mut App) -> Result<()> {
    let inner_area = app.world_map_state.inner_area;
    if !inner_area.contains(Position::new(event.column, event.row)) {
        app.world_map_state.hovered_object = None;
        return Ok(());
    }

    // Convert window coordinates to area coordinates
    let mouse = Position::new(event.column - inner_area.x, event.row - inner_area.y);

    if let MouseEventKind::Down(button) = event.kind {
        match button {
            MouseButton::Left => {
                app.world_map_state.selected_object = get_nearest_object(app, mouse.x, mouse.y);
            }
            MouseButton::Right => {
                app.world_map_state.selected_object = None;
            }
            _ => {}
        }
    }
    app.world_map_state.hovered_object = get_nearest_object(app, mouse.x, mouse.y);

    Ok(())
}

/// Get the index of the visible satellite nearest to the given area coordinates
fn get_nearest_object(app: &App, x: u16, y: u16) -> Option<usize> {
    let (lon, lat) = area_to_lon_lat(x, y, app.world_map_state.inner_area);
    app.satellites_state
        .items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.visible)
        .min_by_key(|(_, item)| {
            let (marker_lat, marker_lon) = item.animation.marker();
            let dx = marker_lon - lon;
            let dy = marker_lat - lat;
            ((dx * dx + dy * dy) * 1000.0) as i64
        })
        .map(|(index, _)| index)
}

/// Convert area coordinates to lon/lat coordinates
fn area_to_lon_lat(x: u16, y: u16, area: Rect) -> (f64, f64) {
    debug_assert!(x < area.width && y < area.height);

    let normalized_x = (x + 1) as f64 / area.width as f64;
    let normalized_y = (y + 1) as f64 / area.height as f64;
    let lon = -180.0 + normalized_x * 360.0;
    let lat = 90.0 - normalized_y * 180.0;
    (lon, lat)
}
