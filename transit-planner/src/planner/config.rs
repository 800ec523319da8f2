//! Cost model configuration for the path finder.

use crate::domain::{DEFAULT_PEAK_WINDOWS, PeakWindow, Station, is_peak_hour};

/// Parameters of the crowd-aware edge cost.
#[derive(Debug, Clone)]
pub struct PathConfig {
    /// Cost of traversing any edge.
    pub base_cost: f64,

    /// Multiplier applied to the entered station's crowd fraction during
    /// peak hours. A full station (crowd 1.0) costs `base_cost + crowd_weight`.
    pub crowd_weight: f64,

    /// Hours during which crowding is penalized.
    pub peak_windows: Vec<PeakWindow>,
}

impl PathConfig {
    pub fn new(base_cost: f64, crowd_weight: f64, peak_windows: Vec<PeakWindow>) -> Self {
        Self {
            base_cost,
            crowd_weight,
            peak_windows,
        }
    }

    pub fn is_peak_hour(&self, hour: u32) -> bool {
        is_peak_hour(&self.peak_windows, hour)
    }

    /// Cost of moving into `to` at the given hour.
    ///
    /// Outside peak windows every edge costs the same, so the search
    /// degenerates to hop count.
    pub fn edge_cost(&self, to: &Station, hour: u32) -> f64 {
        if self.is_peak_hour(hour) {
            self.base_cost + to.crowd() * self.crowd_weight
        } else {
            self.base_cost
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            base_cost: 1.0,
            crowd_weight: 2.0,
            peak_windows: DEFAULT_PEAK_WINDOWS.to_vec(),
        }
    }
}
