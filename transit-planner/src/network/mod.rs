//! Station network: graph construction, nearest-station snapping and
//! transfer discovery.

mod context;
mod graph;
mod shared;
mod transfer;

pub use context::Network;
pub use graph::StationGraph;
pub use shared::SharedNetwork;
pub use transfer::{
    INTERCHANGE_RADIUS_M, TRANSFER_SEARCH_RADIUS_M, find_transfer_point, is_interchange,
};
