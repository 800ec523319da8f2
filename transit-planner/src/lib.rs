//! Transit journey planner.
//!
//! Answers "how do I get from here to there by rail?": free-text endpoints
//! are resolved to stations, a crowd-aware least-cost path is found through
//! the network, and the trip is priced including walking or ride-hailing to
//! and from the stations.

pub mod config;
pub mod crowd;
pub mod dataset;
pub mod domain;
pub mod fare;
pub mod geo;
pub mod geocode;
pub mod journey;
pub mod matching;
pub mod network;
pub mod planner;
pub mod web;
