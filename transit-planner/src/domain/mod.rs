//! Domain types for the transit journey planner.
//!
//! Stations arrive from an already-parsed dataset snapshot; the only field
//! mutated afterwards is the crowd fraction.

mod peak;
mod station;

pub use peak::{DEFAULT_PEAK_WINDOWS, PeakWindow, current_hour, is_peak_hour};
pub use station::{RouteId, Station, StationId};
