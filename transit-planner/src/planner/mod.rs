//! Path finder.
//!
//! Runs a crowd-aware Dijkstra search over the station graph. Outside rush
//! hours the cost model is plain hop count; during rush hours entering a
//! crowded station costs extra, steering routes around congestion.

mod config;
mod search;

pub use config::PathConfig;
pub use search::PathFinder;
