//! JSON snapshot loading.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::crowd::RidershipRecord;
use crate::domain::Station;

use super::error::DatasetError;

/// A station entry as it appears in the dataset file.
///
/// Everything is optional, and each entry is decoded on its own, so one bad
/// entry does not reject the file.
#[derive(Debug, Deserialize)]
struct StationRecord {
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    route_id: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    #[serde(default)]
    crowd: Option<f64>,
}

impl StationRecord {
    fn into_station(self) -> Option<Station> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let lat = self.lat.filter(|v| v.is_finite())?;
        let lng = self.lng.filter(|v| v.is_finite())?;

        let station = Station::new(
            id,
            self.name.unwrap_or_default(),
            self.route_id.unwrap_or_default(),
            lat,
            lng,
        );
        Some(station.with_crowd(self.crowd.unwrap_or(0.0)))
    }
}

fn read(path: &Path) -> Result<String, DatasetError> {
    std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a station list.
///
/// Entries without an id, without numeric finite coordinates, or with
/// mistyped fields are dropped with a warning. Crowd values are clamped
/// into `[0, 1]`.
pub fn parse_stations(json: &str) -> Result<Vec<Station>, DatasetError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| DatasetError::Json {
            message: e.to_string(),
        })?;

    let total = entries.len();
    let stations: Vec<Station> = entries
        .into_iter()
        .filter_map(|entry| StationRecord::deserialize(entry).ok())
        .filter_map(StationRecord::into_station)
        .collect();

    if stations.len() < total {
        warn!(
            dropped = total - stations.len(),
            "Skipped malformed station entries"
        );
    }

    Ok(stations)
}

/// Load the station list from a JSON file.
pub fn load_stations(path: &Path) -> Result<Vec<Station>, DatasetError> {
    let stations = parse_stations(&read(path)?)?;
    info!(path = %path.display(), count = stations.len(), "Loaded stations");
    Ok(stations)
}

/// Parse ridership rows, oldest first.
pub fn parse_ridership(json: &str) -> Result<Vec<RidershipRecord>, DatasetError> {
    serde_json::from_str(json).map_err(|e| DatasetError::Json {
        message: e.to_string(),
    })
}

/// Load the most recent ridership row (the last one in the file).
pub fn load_latest_ridership(path: &Path) -> Result<RidershipRecord, DatasetError> {
    let rows = parse_ridership(&read(path)?)?;
    let latest = rows.into_iter().last().ok_or(DatasetError::Empty)?;
    debug!(path = %path.display(), date = ?latest.date, "Loaded ridership");
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_station_entries() {
        let stations = parse_stations(
            r#"[
                {"id": "KJ10", "name": "KLCC", "route_id": "KJ", "lat": 3.159, "lng": 101.7133, "crowd": 0.4},
                {"id": "KJ11", "name": "Kampung Baru", "route_id": "KJ", "lat": 3.1613, "lng": 101.7064}
            ]"#,
        )
        .unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id.as_str(), "KJ10");
        assert_eq!(stations[0].crowd(), 0.4);
        assert_eq!(stations[1].crowd(), 0.0);
    }

    #[test]
    fn drops_entries_without_coordinates_or_id() {
        let stations = parse_stations(
            r#"[
                {"id": "A1", "name": "Ok", "route_id": "A", "lat": 3.0, "lng": 101.0},
                {"id": "A2", "name": "No lat", "route_id": "A", "lng": 101.0},
                {"id": "A3", "name": "Null lng", "route_id": "A", "lat": 3.0, "lng": null},
                {"name": "No id", "route_id": "A", "lat": 3.0, "lng": 101.0},
                {"id": "", "name": "Empty id", "route_id": "A", "lat": 3.0, "lng": 101.0}
            ]"#,
        )
        .unwrap();

        let ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["A1"]);
    }

    #[test]
    fn mistyped_entries_do_not_reject_the_file() {
        let stations = parse_stations(
            r#"[
                {"id": "A1", "name": "Ok", "route_id": "A", "lat": 3.0, "lng": 101.0},
                {"id": "A2", "name": "String lat", "route_id": "A", "lat": "3.01", "lng": 101.0},
                {"id": 3, "name": "Numeric id", "route_id": "A", "lat": 3.0, "lng": 101.0},
                "not a station",
                {"id": "A4", "name": "Ok too", "route_id": "A", "lat": 3.02, "lng": 101.01}
            ]"#,
        )
        .unwrap();

        let ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A4"]);
    }

    #[test]
    fn clamps_crowd() {
        let stations = parse_stations(
            r#"[{"id": "A1", "lat": 3.0, "lng": 101.0, "crowd": 7.5}]"#,
        )
        .unwrap();
        assert_eq!(stations[0].crowd(), 1.0);
        assert_eq!(stations[0].name, "");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_stations("{\"id\": 1"),
            Err(DatasetError::Json { .. })
        ));
    }

    #[test]
    fn load_from_file() {
        let file = file_with(
            r#"[{"id": "MR1", "name": "KL Sentral", "route_id": "MR", "lat": 3.1324, "lng": 101.6872}]"#,
        );
        let stations = load_stations(file.path()).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].route_id.as_str(), "MR");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_stations(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn latest_ridership_is_last_row() {
        let file = file_with(
            r#"[
                {"date": "2025-06-29", "rail_lrt_kj": "200000"},
                {"date": "2025-06-30", "rail_lrt_kj": "250000"}
            ]"#,
        );
        let latest = load_latest_ridership(file.path()).unwrap();
        assert_eq!(latest.date.as_deref(), Some("2025-06-30"));
        assert_eq!(latest.daily("rail_lrt_kj"), 250_000);
    }

    #[test]
    fn empty_ridership_file() {
        let file = file_with("[]");
        assert!(matches!(
            load_latest_ridership(file.path()),
            Err(DatasetError::Empty)
        ));
    }
}
