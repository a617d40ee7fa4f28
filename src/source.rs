use std::fs;

use serde::Deserialize;
use thiserror::Error;
use ureq::serde_json;

use crate::satellite::Satellite;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed satellite document: {0}")]
    Malformed(String),
}

/// Loads the satellite document from an HTTP(S) URL or a local path.
///
/// Fetch and document-level errors abort the whole load; no partial set is
/// returned from a failed fetch.
pub fn load(source: &str) -> Result<Vec<Satellite>, LoadError> {
    let body = if source.starts_with("http://") || source.starts_with("https://") {
        ureq::get(source)
            .call()
            .map_err(|e| LoadError::Fetch {
                url: source.to_string(),
                source: Box::new(e),
            })?
            .into_string()
            .map_err(|e| LoadError::Read {
                path: source.to_string(),
                source: e,
            })?
    } else {
        fs::read_to_string(source).map_err(|e| LoadError::Read {
            path: source.to_string(),
            source: e,
        })?
    };
    parse_document(&body)
}

/// Parses the document body. The top-level `satellites` array is required;
/// individual records that match neither known shape are skipped with a
/// warning while the rest of the batch still loads.
pub fn parse_document(body: &str) -> Result<Vec<Satellite>, LoadError> {
    let document: serde_json::Value =
        serde_json::from_str(body).map_err(|e| LoadError::Malformed(e.to_string()))?;
    let records = document
        .get("satellites")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| LoadError::Malformed("missing `satellites` array".into()))?;

    let mut satellites = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match Satellite::deserialize(record) {
            Ok(satellite) => satellites.push(satellite),
            Err(e) => log::warn!("skipping satellite record {index}: {e}"),
        }
    }
    Ok(satellites)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_both_record_shapes() {
        let satellites = parse_document(
            r#"{"satellites": [
                {
                    "name": "ISS (ZARYA)",
                    "details_url": "https://example.org/iss",
                    "current_position": {
                        "lat": 10.0, "lon": 20.0, "altitude": 420.0,
                        "timestamp": "2024-11-10T12:00:00Z"
                    },
                    "future_passes": [{"lat": 11.0, "lon": 22.0}]
                },
                {
                    "name": "Hubble",
                    "lat": -5.0,
                    "lon": 100.0,
                    "launch_date": "1990-04-24",
                    "details_url": "https://example.org/hst"
                }
            ]}"#,
        )
        .unwrap();
        assert_eq!(satellites.len(), 2);
        assert_eq!(satellites[0].name(), "ISS (ZARYA)");
        assert_eq!(satellites[1].name(), "Hubble");
    }

    #[test]
    fn skips_malformed_records_and_keeps_the_rest() {
        let satellites = parse_document(
            r#"{"satellites": [
                {"name": "No position at all", "details_url": "https://example.org/x"},
                {
                    "name": "Hubble",
                    "lat": -5.0,
                    "lon": 100.0,
                    "launch_date": "1990-04-24",
                    "details_url": "https://example.org/hst"
                }
            ]}"#,
        )
        .unwrap();
        assert_eq!(satellites.len(), 1);
        assert_eq!(satellites[0].name(), "Hubble");
    }

    #[test]
    fn missing_satellites_array_is_fatal() {
        assert!(matches!(
            parse_document("{}"),
            Err(LoadError::Malformed(_))
        ));
        assert!(matches!(
            parse_document(r#"{"satellites": 3}"#),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn invalid_json_is_fatal() {
        assert!(matches!(
            parse_document("not json"),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn empty_array_loads_no_satellites() {
        assert!(parse_document(r#"{"satellites": []}"#).unwrap().is_empty());
    }
}
