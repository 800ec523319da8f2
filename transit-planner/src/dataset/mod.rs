//! Station and ridership snapshots on disk.

mod error;
mod loader;

pub use error::DatasetError;
pub use loader::{load_latest_ridership, load_stations, parse_ridership, parse_stations};
