use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use strum::Display;

use crate::track;

/// A snapshot of a satellite's ground position at a known time.
#[derive(Clone, Debug, Deserialize)]
pub struct GroundPosition {
    pub lat: f64,
    pub lon: f64,
    /// Height above the ellipsoid in km.
    pub altitude: f64,
    /// RFC 3339 timestamp of the snapshot.
    pub timestamp: String,
}

impl GroundPosition {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// One point of a chronological sequence of predicted passes.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct PredictedPass {
    pub lat: f64,
    pub lon: f64,
}

/// A satellite record, resolved to one of the two known document shapes at
/// load time.
///
/// `Tracked` is tried first; its field set is disjoint from `Simple`, so a
/// record can only ever match one variant.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Satellite {
    Tracked {
        name: String,
        details_url: String,
        current_position: GroundPosition,
        future_passes: Vec<PredictedPass>,
    },
    Simple {
        name: String,
        lat: f64,
        lon: f64,
        launch_date: String,
        details_url: String,
    },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Display)]
pub enum Kind {
    #[strum(to_string = "Position only")]
    Simple,
    #[strum(to_string = "Tracked with forecast")]
    Tracked,
}

impl Satellite {
    pub fn name(&self) -> &str {
        match self {
            Self::Tracked { name, .. } | Self::Simple { name, .. } => name,
        }
    }

    pub fn details_url(&self) -> &str {
        match self {
            Self::Tracked { details_url, .. } | Self::Simple { details_url, .. } => details_url,
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Tracked { .. } => Kind::Tracked,
            Self::Simple { .. } => Kind::Simple,
        }
    }

    pub fn current_position(&self) -> Option<&GroundPosition> {
        match self {
            Self::Tracked {
                current_position, ..
            } => Some(current_position),
            Self::Simple { .. } => None,
        }
    }

    pub fn launch_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Simple { launch_date, .. } => {
                NaiveDate::parse_from_str(launch_date, "%Y-%m-%d").ok()
            }
            Self::Tracked { .. } => None,
        }
    }

    /// Builds the (lat, lon) ground track: the current position followed by
    /// the predicted passes, extended by `steps` extrapolated points.
    ///
    /// A `Simple` record has no passes, so its track is its single position
    /// and no extrapolation happens.
    pub fn track(&self, steps: usize) -> Vec<(f64, f64)> {
        match self {
            Self::Simple { lat, lon, .. } => vec![(*lat, *lon)],
            Self::Tracked {
                current_position,
                future_passes,
                ..
            } => {
                let mut points = Vec::with_capacity(future_passes.len() + 1);
                points.push((current_position.lat, current_position.lon));
                points.extend(future_passes.iter().map(|pass| (pass.lat, pass.lon)));
                track::extend(&points, steps)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ureq::serde_json;

    fn tracked() -> Satellite {
        serde_json::from_str(
            r#"{
                "name": "ISS (ZARYA)",
                "details_url": "https://example.org/iss",
                "current_position": {
                    "lat": 10.0, "lon": 20.0, "altitude": 420.0,
                    "timestamp": "2024-11-10T12:00:00Z"
                },
                "future_passes": [{"lat": 11.0, "lon": 22.0}, {"lat": 12.0, "lon": 24.0}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn resolves_tracked_shape() {
        let satellite = tracked();
        assert_eq!(satellite.kind(), Kind::Tracked);
        assert_eq!(satellite.name(), "ISS (ZARYA)");
        let position = satellite.current_position().unwrap();
        assert_eq!(position.altitude, 420.0);
        assert!(position.timestamp().is_some());
    }

    #[test]
    fn resolves_simple_shape() {
        let satellite: Satellite = serde_json::from_str(
            r#"{
                "name": "Hubble",
                "lat": -5.0,
                "lon": 100.0,
                "launch_date": "1990-04-24",
                "details_url": "https://example.org/hst"
            }"#,
        )
        .unwrap();
        assert_eq!(satellite.kind(), Kind::Simple);
        assert_eq!(
            satellite.launch_date(),
            NaiveDate::from_ymd_opt(1990, 4, 24)
        );
        assert_eq!(satellite.track(5), vec![(-5.0, 100.0)]);
    }

    #[test]
    fn track_prepends_position_and_extrapolates() {
        assert_eq!(
            tracked().track(2),
            vec![
                (10.0, 20.0),
                (11.0, 22.0),
                (12.0, 24.0),
                (13.0, 26.0),
                (14.0, 28.0),
            ]
        );
    }
}
