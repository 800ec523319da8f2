//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points, in meters.
///
/// Uses the haversine formula. Total for finite inputs.
///
/// # Examples
///
/// ```
/// use transit_planner::geo::distance;
///
/// assert_eq!(distance(3.15, 101.7, 3.15, 101.7), 0.0);
///
/// // One degree of latitude is roughly 111 km.
/// let d = distance(0.0, 0.0, 1.0, 0.0);
/// assert!((d - 111_195.0).abs() < 1.0);
/// ```
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `Some` only if both components are finite numbers.
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        (lat.is_finite() && lng.is_finite()).then_some(Self { lat, lng })
    }

    /// Distance to another point, in meters.
    pub fn distance_to(&self, other: &Coords) -> f64 {
        distance(self.lat, self.lng, other.lat, other.lng)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Distance does not depend on argument order
        #[test]
        fn symmetric(
            lat1 in -89.0f64..89.0, lng1 in -179.0f64..179.0,
            lat2 in -89.0f64..89.0, lng2 in -179.0f64..179.0,
        ) {
            let ab = distance(lat1, lng1, lat2, lng2);
            let ba = distance(lat2, lng2, lat1, lng1);
            prop_assert!((ab - ba).abs() < 1e-6);
        }

        /// Distance is never negative and never exceeds half the circumference
        #[test]
        fn bounded(
            lat1 in -90.0f64..90.0, lng1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0, lng2 in -180.0f64..180.0,
        ) {
            let d = distance(lat1, lng1, lat2, lng2);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_M + 1e-6);
        }
    }
}
