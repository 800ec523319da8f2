//! Journey planner.
//!
//! Ties the pieces together: resolve both queries, snap to stations, find
//! the path, price it, then describe it as a summary and a list of insights.

mod insights;
mod plan;
mod summary;

pub use insights::{
    AnnotatorError, CROWDED_THRESHOLD, TIP_UNAVAILABLE, TipAnnotator, WALK_NOTE_M, build_insights,
    format_distance,
};
pub use plan::{Endpoint, Journey, JourneyEndpoint, JourneyPlanner, PlanError, annotate};
pub use summary::{
    GRAB_MINUTES, JourneySummary, MINUTES_PER_STOP, SegmentKind, SummarySegment,
    WALK_METERS_PER_MINUTE, build_summary, path_distance,
};
