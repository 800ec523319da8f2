//! Web layer for the transit journey planner.
//!
//! Provides JSON endpoints for planning journeys and looking up stations.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
