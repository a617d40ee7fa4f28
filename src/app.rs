use std::time::{Duration, Instant};

use crate::{
    source,
    widgets::{
        object_information::ObjectInformationState, satellites::SatellitesState,
        world_map::WorldMapState,
    },
};

/// Runtime configuration, resolved once from the command line.
#[derive(Clone, Debug)]
pub struct Config {
    /// URL or local path of the satellite document.
    pub source: String,
    /// Wall-clock delay between animation frames.
    pub interval: Duration,
    /// Extrapolated points appended beyond the last predicted pass.
    pub steps: usize,
}

/// Application state: one instance owns every widget state, passed explicitly
/// to handlers instead of living in a global.
pub struct App {
    /// Is the application running?
    pub running: bool,

    pub config: Config,
    pub satellites_state: SatellitesState,
    pub world_map_state: WorldMapState,
    pub object_information_state: ObjectInformationState,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            running: true,
            config,
            satellites_state: SatellitesState::default(),
            world_map_state: WorldMapState::default(),
            object_information_state: ObjectInformationState::default(),
        }
    }

    /// Loads (or reloads) the satellite document, replacing the displayed
    /// set. A document-level failure leaves the map unpopulated; the error is
    /// shown in the satellite list panel until a manual reload succeeds.
    pub fn load(&mut self) {
        self.world_map_state.selected_object = None;
        self.world_map_state.hovered_object = None;
        match source::load(&self.config.source) {
            Ok(satellites) => {
                log::info!(
                    "loaded {} satellites from {}",
                    satellites.len(),
                    self.config.source
                );
                self.satellites_state.replace(satellites, &self.config);
            }
            Err(e) => {
                log::error!("{e}");
                self.satellites_state.fail(&e);
            }
        }
    }

    /// Handles the update event: advances each visible satellite's animation
    /// when its own interval has elapsed.
    pub fn tick(&mut self) {
        let now = Instant::now();
        for item in &mut self.satellites_state.items {
            if item.visible {
                item.animation.tick(now);
            }
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
