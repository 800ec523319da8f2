//! Ridership-based crowd estimation.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{DEFAULT_PEAK_WINDOWS, PeakWindow, RouteId, Station, is_peak_hour};
use crate::network::Network;

use super::ridership::RidershipRecord;

/// Tuning for the crowd model.
#[derive(Debug, Clone)]
pub struct CrowdConfig {
    /// Line id to ridership column; unmapped lines keep their crowd
    pub route_columns: HashMap<RouteId, String>,
    /// Hourly capacity per ridership column
    pub capacities: HashMap<String, f64>,
    /// Capacity for columns not listed in `capacities`
    pub default_capacity: f64,
    /// Hours per day the network carries passengers
    pub active_hours: f64,
    pub peak_multiplier: f64,
    /// Scales capacity so typical loads stay well below 1.0
    pub capacity_factor: f64,
    pub peak_windows: Vec<PeakWindow>,
}

impl Default for CrowdConfig {
    fn default() -> Self {
        let route_columns = [
            ("AG", "rail_lrt_ampang"),
            ("PH", "rail_lrt_ampang"),
            ("KJ", "rail_lrt_kj"),
            ("MR", "rail_monorail"),
            ("MRT", "rail_mrt_kajang"),
            ("PYL", "rail_mrt_pjy"),
        ]
        .into_iter()
        .map(|(route, column)| (RouteId::new(route), column.to_string()))
        .collect();

        let capacities = [
            ("rail_lrt_ampang", 5000.0),
            ("rail_mrt_kajang", 8000.0),
            ("rail_lrt_kj", 4000.0),
            ("rail_monorail", 3000.0),
            ("rail_mrt_pjy", 6000.0),
        ]
        .into_iter()
        .map(|(column, capacity)| (column.to_string(), capacity))
        .collect();

        Self {
            route_columns,
            capacities,
            default_capacity: 500.0,
            active_hours: 16.0,
            peak_multiplier: 1.5,
            capacity_factor: 5.0,
            peak_windows: DEFAULT_PEAK_WINDOWS.to_vec(),
        }
    }
}

impl CrowdConfig {
    /// Map an extra line onto a ridership column.
    pub fn with_route(mut self, route: impl Into<String>, column: impl Into<String>) -> Self {
        self.route_columns.insert(RouteId::new(route), column.into());
        self
    }

    pub fn with_capacity(mut self, column: impl Into<String>, capacity: f64) -> Self {
        self.capacities.insert(column.into(), capacity);
        self
    }

    fn capacity(&self, column: &str) -> f64 {
        self.capacities
            .get(column)
            .copied()
            .unwrap_or(self.default_capacity)
    }
}

/// Estimates per-station crowd fractions from the latest daily ridership.
///
/// A line's daily boardings are spread evenly over its active hours and its
/// stations, raised during rush hours, and divided by scaled capacity.
#[derive(Debug, Clone)]
pub struct CrowdEstimator {
    ridership: RidershipRecord,
    config: CrowdConfig,
}

impl CrowdEstimator {
    pub fn new(ridership: RidershipRecord, config: CrowdConfig) -> Self {
        Self { ridership, config }
    }

    /// Estimator over the built-in fallback figures.
    pub fn fallback() -> Self {
        Self::new(RidershipRecord::fallback(), CrowdConfig::default())
    }

    pub fn ridership(&self) -> &RidershipRecord {
        &self.ridership
    }

    /// Crowd fraction for one station, or `None` if its line has no
    /// ridership column (the caller keeps the current value).
    ///
    /// `line_size` is the number of stations on the station's line.
    pub fn estimate(&self, station: &Station, line_size: usize, hour: u32) -> Option<f64> {
        let column = self.config.route_columns.get(&station.route_id)?;
        let daily = self.ridership.daily(column);
        if daily == 0 {
            return Some(0.0);
        }

        let mut hourly = daily as f64 / self.config.active_hours / line_size.max(1) as f64;
        if is_peak_hour(&self.config.peak_windows, hour) {
            hourly *= self.config.peak_multiplier;
        }

        let capacity = self.config.capacity(column) * self.config.capacity_factor;
        let crowd = (hourly / capacity).min(1.0);
        Some((crowd * 1000.0).round() / 1000.0)
    }

    /// Recompute every mapped station's crowd in place. Returns how many
    /// stations were updated.
    pub fn apply(&self, network: &mut Network, hour: u32) -> usize {
        let line_sizes: HashMap<RouteId, usize> = network
            .line_sizes()
            .into_iter()
            .map(|(route, size)| (route.clone(), size))
            .collect();

        let mut updated = 0;
        for station in network.stations_mut() {
            let size = line_sizes.get(&station.route_id).copied().unwrap_or(1);
            if let Some(crowd) = self.estimate(station, size, hour) {
                station.set_crowd(crowd);
                updated += 1;
            }
        }

        debug!(hour, updated, "Applied crowd estimates");
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kj_line(n: usize) -> Vec<Station> {
        (1..=n)
            .map(|i| Station::new(format!("KJ{i}"), format!("KJ stop {i}"), "KJ", 3.0, 101.0))
            .collect()
    }

    fn kj_station() -> Station {
        Station::new("KJ1", "Gombak", "KJ", 3.2312, 101.7245)
    }

    fn estimator(daily: u64) -> CrowdEstimator {
        CrowdEstimator::new(
            RidershipRecord::default().with_column("rail_lrt_kj", daily),
            CrowdConfig::default(),
        )
    }

    #[test]
    fn off_peak_estimate() {
        // 640000 / 16 h / 4 stations = 10000 per hour; capacity 4000 * 5
        let station = &kj_station();
        assert_eq!(estimator(640_000).estimate(station, 4, 12), Some(0.5));
    }

    #[test]
    fn peak_multiplier() {
        let station = &kj_station();
        assert_eq!(estimator(640_000).estimate(station, 4, 8), Some(0.75));
        assert_eq!(estimator(640_000).estimate(station, 4, 19), Some(0.75));
        assert_eq!(estimator(640_000).estimate(station, 4, 20), Some(0.5));
    }

    #[test]
    fn capped_at_one() {
        let station = &kj_station();
        assert_eq!(estimator(100_000_000).estimate(station, 1, 9), Some(1.0));
    }

    #[test]
    fn rounded_to_three_decimals() {
        // 1000 / 16 / 3 = 20.833.. per hour over 20000 capacity
        let station = &kj_station();
        assert_eq!(estimator(1000).estimate(station, 3, 12), Some(0.001));
    }

    #[test]
    fn zero_ridership_is_zero() {
        let station = kj_station().with_crowd(0.6);
        assert_eq!(estimator(0).estimate(&station, 4, 9), Some(0.0));
    }

    #[test]
    fn unmapped_line_is_none() {
        let station = Station::new("BRT1", "Sunway", "BRT", 3.0, 101.0);
        assert_eq!(estimator(640_000).estimate(&station, 4, 12), None);
    }

    #[test]
    fn unknown_column_uses_default_capacity() {
        let config = CrowdConfig::default().with_route("SP", "rail_lrt_sp");
        let estimator = CrowdEstimator::new(
            RidershipRecord::default().with_column("rail_lrt_sp", 80_000),
            config,
        );
        // 80000 / 16 / 1 = 5000 over 500 * 5
        let station = Station::new("SP1", "Sentul Timur", "SP", 3.0, 101.0);
        assert_eq!(estimator.estimate(&station, 1, 12), Some(1.0));

        let estimator = estimator_with_capacity();
        assert_eq!(estimator.estimate(&station, 1, 12), Some(0.1));
    }

    fn estimator_with_capacity() -> CrowdEstimator {
        CrowdEstimator::new(
            RidershipRecord::default().with_column("rail_lrt_sp", 80_000),
            CrowdConfig::default()
                .with_route("SP", "rail_lrt_sp")
                .with_capacity("rail_lrt_sp", 10_000.0),
        )
    }

    #[test]
    fn apply_updates_mapped_stations_only() {
        let mut stations = kj_line(4);
        stations.push(Station::new("BRT1", "Sunway", "BRT", 3.0, 101.0).with_crowd(0.3));
        let mut network = Network::new(stations);

        let updated = estimator(640_000).apply(&mut network, 12);

        assert_eq!(updated, 4);
        assert_eq!(network.station(&"KJ1".into()).unwrap().crowd(), 0.5);
        assert_eq!(network.station(&"KJ4".into()).unwrap().crowd(), 0.5);
        assert_eq!(network.station(&"BRT1".into()).unwrap().crowd(), 0.3);
    }

    #[test]
    fn fallback_estimator() {
        let mut network = Network::new(kj_line(2));
        let updated = CrowdEstimator::fallback().apply(&mut network, 12);
        assert_eq!(updated, 2);
        // 60000 / 16 / 2 = 1875 over 20000
        assert_eq!(network.station(&"KJ1".into()).unwrap().crowd(), 0.094);
    }
}
