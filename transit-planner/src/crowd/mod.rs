//! Crowd estimator.
//!
//! Derives a congestion fraction for every station from published daily
//! line ridership and keeps it current on an hourly schedule. The path
//! finder reads these fractions to steer rush-hour routes.

mod estimator;
mod ridership;
mod schedule;

pub use estimator::{CrowdConfig, CrowdEstimator};
pub use ridership::RidershipRecord;
pub use schedule::{CROWD_REFRESH_INTERVAL, refresh_crowds, spawn_crowd_updates};
