//! Station and line identifier types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::Coords;

/// Unique identifier of a station within a dataset snapshot (e.g. `KJ10`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first run of ASCII digits in the identifier, if any.
    ///
    /// Station identifiers encode their position along a line
    /// (`KJ10` comes after `KJ9`), so this is the line-order key.
    ///
    /// ```
    /// use transit_planner::domain::StationId;
    ///
    /// assert_eq!(StationId::new("KJ10").sequence_number(), Some(10));
    /// assert_eq!(StationId::new("SBK01A").sequence_number(), Some(1));
    /// assert_eq!(StationId::new("HUB").sequence_number(), None);
    /// ```
    pub fn sequence_number(&self) -> Option<u64> {
        let start = self.0.find(|c: char| c.is_ascii_digit())?;
        let digits: &str = &self.0[start..];
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        digits[..end].parse().ok()
    }
}

impl From<&str> for StationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a transit line (`route_id` in the dataset).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named stop belonging to exactly one line.
///
/// The crowd fraction is the only field mutated after load; it is kept
/// within `[0, 1]` by [`Station::set_crowd`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub route_id: RouteId,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, deserialize_with = "deserialize_crowd")]
    crowd: f64,
}

/// Clamp into `[0, 1]`; non-finite values are treated as unknown (zero).
fn clamp_crowd(crowd: f64) -> f64 {
    if crowd.is_finite() {
        crowd.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn deserialize_crowd<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let crowd = Option::<f64>::deserialize(deserializer)?;
    Ok(clamp_crowd(crowd.unwrap_or(0.0)))
}

impl Station {
    /// Create a station with an unknown (zero) crowd level.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        route_id: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            id: StationId::new(id),
            name: name.into(),
            route_id: RouteId::new(route_id),
            lat,
            lng,
            crowd: 0.0,
        }
    }

    /// Builder-style crowd setter.
    pub fn with_crowd(mut self, crowd: f64) -> Self {
        self.set_crowd(crowd);
        self
    }

    pub fn coords(&self) -> Coords {
        Coords::new(self.lat, self.lng)
    }

    /// Current congestion fraction in `[0, 1]`.
    pub fn crowd(&self) -> f64 {
        self.crowd
    }

    /// Set the congestion fraction, clamping into `[0, 1]`.
    /// Non-finite values are treated as unknown (zero).
    pub fn set_crowd(&mut self, crowd: f64) {
        self.crowd = clamp_crowd(crowd);
    }

    /// Display name uppercased and trimmed, used to detect interchanges.
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_uppercase()
    }

    /// Distance from this station to a point, in meters.
    pub fn distance_to(&self, coords: &Coords) -> f64 {
        self.coords().distance_to(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_number_takes_first_digit_run() {
        assert_eq!(StationId::new("AG18").sequence_number(), Some(18));
        assert_eq!(StationId::new("PY01").sequence_number(), Some(1));
        assert_eq!(StationId::new("KJ1-2").sequence_number(), Some(1));
        assert_eq!(StationId::new("1000").sequence_number(), Some(1000));
    }

    #[test]
    fn sequence_number_absent() {
        assert_eq!(StationId::new("").sequence_number(), None);
        assert_eq!(StationId::new("SENTRAL").sequence_number(), None);
    }

    #[test]
    fn sequence_number_overflow_is_none() {
        assert_eq!(
            StationId::new("X99999999999999999999999").sequence_number(),
            None
        );
    }

    #[test]
    fn crowd_is_clamped() {
        let mut s = Station::new("KJ10", "KLCC", "KJ", 3.159, 101.713);
        assert_eq!(s.crowd(), 0.0);

        s.set_crowd(0.4);
        assert_eq!(s.crowd(), 0.4);

        s.set_crowd(1.7);
        assert_eq!(s.crowd(), 1.0);

        s.set_crowd(-0.2);
        assert_eq!(s.crowd(), 0.0);

        s.set_crowd(f64::NAN);
        assert_eq!(s.crowd(), 0.0);
    }

    #[test]
    fn normalized_name_uppercases_and_trims() {
        let s = Station::new("KJ10", "  Klcc ", "KJ", 3.159, 101.713);
        assert_eq!(s.normalized_name(), "KLCC");
    }

    #[test]
    fn deserialize_defaults_crowd() {
        let json = r#"{"id":"KJ10","name":"KLCC","route_id":"KJ","lat":3.159,"lng":101.713}"#;
        let s: Station = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, StationId::new("KJ10"));
        assert_eq!(s.route_id, RouteId::new("KJ"));
        assert_eq!(s.crowd(), 0.0);
    }

    #[test]
    fn deserialize_clamps_crowd() {
        let json = r#"{"id":"KJ10","name":"KLCC","route_id":"KJ","lat":3.159,"lng":101.713,"crowd":4.2}"#;
        let s: Station = serde_json::from_str(json).unwrap();
        assert_eq!(s.crowd(), 1.0);

        let json = r#"{"id":"KJ10","name":"KLCC","route_id":"KJ","lat":3.159,"lng":101.713,"crowd":-0.5}"#;
        let s: Station = serde_json::from_str(json).unwrap();
        assert_eq!(s.crowd(), 0.0);

        let json = r#"{"id":"KJ10","name":"KLCC","route_id":"KJ","lat":3.159,"lng":101.713,"crowd":null}"#;
        let s: Station = serde_json::from_str(json).unwrap();
        assert_eq!(s.crowd(), 0.0);
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::new("KJ10");
        assert_eq!(format!("{id}"), "KJ10");
        assert_eq!(format!("{id:?}"), "StationId(KJ10)");
        assert_eq!(format!("{:?}", RouteId::new("KJ")), "RouteId(KJ)");
    }
}
