//! Fare engine.
//!
//! A journey costs a flat amount per transit hop, plus ride-hailing for any
//! access leg too long to walk. Amounts are in ringgit.

use std::fmt;

use serde::Serialize;

use crate::domain::Station;

/// Ride-hailing ("Grab") tariff.
#[derive(Debug, Clone, PartialEq)]
pub struct RideHailRates {
    pub base_fare: f64,
    pub per_km: f64,
    pub per_minute: f64,
    pub booking_fee: f64,
    pub surge_multiplier: f64,
    /// Assumed door-to-door speed in traffic, km/h
    pub average_speed_kmh: f64,
}

impl Default for RideHailRates {
    fn default() -> Self {
        Self {
            base_fare: 2.00,
            per_km: 0.65,
            per_minute: 0.30,
            booking_fee: 1.00,
            surge_multiplier: 1.0,
            average_speed_kmh: 30.0,
        }
    }
}

impl RideHailRates {
    /// Estimated ride time for a distance, in minutes.
    pub fn minutes_for(&self, meters: f64) -> f64 {
        meters / 1000.0 / self.average_speed_kmh * 60.0
    }

    /// Unrounded price of a ride of the given length.
    pub fn price(&self, meters: f64) -> f64 {
        let km = meters / 1000.0;
        let minutes = self.minutes_for(meters);
        (self.base_fare + km * self.per_km + minutes * self.per_minute + self.booking_fee)
            * self.surge_multiplier
    }
}

/// How an access leg (to the first or from the last station) is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LegMode {
    #[default]
    Walk,
    Grab,
}

impl fmt::Display for LegMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegMode::Walk => f.write_str("Walk"),
            LegMode::Grab => f.write_str("Grab"),
        }
    }
}

/// Fare rules.
#[derive(Debug, Clone, PartialEq)]
pub struct FareConfig {
    /// Flat charge per hop between consecutive stations
    pub transit_per_station: f64,
    /// Access legs longer than this are ridden, not walked
    pub walk_threshold_m: f64,
    pub ride_hail: RideHailRates,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            transit_per_station: 0.30,
            walk_threshold_m: 300.0,
            ride_hail: RideHailRates::default(),
        }
    }
}

impl FareConfig {
    pub fn with_transit_per_station(mut self, fare: f64) -> Self {
        self.transit_per_station = fare;
        self
    }

    pub fn with_walk_threshold(mut self, meters: f64) -> Self {
        self.walk_threshold_m = meters;
        self
    }

    pub fn with_surge(mut self, multiplier: f64) -> Self {
        self.ride_hail.surge_multiplier = multiplier;
        self
    }

    /// Mode for an access leg of the given length.
    pub fn leg_mode(&self, meters: f64) -> LegMode {
        if meters > self.walk_threshold_m {
            LegMode::Grab
        } else {
            LegMode::Walk
        }
    }

    fn leg_price(&self, meters: f64) -> (f64, LegMode) {
        match self.leg_mode(meters) {
            LegMode::Grab => (self.ride_hail.price(meters), LegMode::Grab),
            LegMode::Walk => (0.0, LegMode::Walk),
        }
    }

    /// Price a journey.
    ///
    /// `path` is the ordered station list; the walk distances are from the
    /// user's origin to the first station and from the last station to the
    /// destination, in meters.
    ///
    /// The total is rounded from the unrounded sum, and each component is
    /// rounded on its own, so the total can differ by a cent from the sum of
    /// the displayed components.
    pub fn calculate(&self, path: &[Station], start_walk_m: f64, dest_walk_m: f64) -> FareBreakdown {
        let (start_transport, start_type) = self.leg_price(start_walk_m);
        let (end_transport, end_type) = self.leg_price(dest_walk_m);

        let transit = match path.len() {
            0 | 1 => 0.0,
            n => (n - 1) as f64 * self.transit_per_station,
        };

        let total = transit + start_transport + end_transport;

        FareBreakdown {
            total: round_cents(total),
            transit: round_cents(transit),
            start_transport: round_cents(start_transport),
            end_transport: round_cents(end_transport),
            start_type,
            end_type,
        }
    }
}

/// Round to two decimal places, halves away from zero.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Priced journey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareBreakdown {
    pub total: f64,
    pub transit: f64,
    pub start_transport: f64,
    pub end_transport: f64,
    pub start_type: LegMode,
    pub end_type: LegMode,
}

/// [`FareConfig::calculate`] with the default rules.
pub fn calculate_fare(path: &[Station], start_walk_m: f64, dest_walk_m: f64) -> FareBreakdown {
    FareConfig::default().calculate(path, start_walk_m, dest_walk_m)
}
