//! Rule-based travel insights.

use std::future::Future;

use crate::domain::{RouteId, Station};
use crate::fare::{FareBreakdown, LegMode};

use super::plan::Journey;
use super::summary::MINUTES_PER_STOP;

/// Stations at or above this crowd fraction are called out.
pub const CROWDED_THRESHOLD: f64 = 0.75;

/// Access walks longer than this get a heads-up.
pub const WALK_NOTE_M: f64 = 200.0;

const MAX_CROWDED_NAMES: usize = 3;

/// Shown in place of a tip when the annotator fails.
pub const TIP_UNAVAILABLE: &str = "AI-powered tips are currently unavailable.";

/// Human-readable distance: whole meters below 1 km, else km to 2 places.
///
/// ```
/// use transit_planner::journey::format_distance;
///
/// assert_eq!(format_distance(250.4), "250 m");
/// assert_eq!(format_distance(1234.0), "1.23 km");
/// ```
pub fn format_distance(meters: f64) -> String {
    if meters == 0.0 || !meters.is_finite() {
        "0 km".to_string()
    } else if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

fn fare_lines(fare: &FareBreakdown, insights: &mut Vec<String>) {
    if fare.total <= 0.0 {
        return;
    }
    insights.push(format!("Total fare: RM {:.2}", fare.total));

    let mut parts = Vec::new();
    if fare.start_transport > 0.0 {
        parts.push(format!("{} (start): RM {:.2}", fare.start_type, fare.start_transport));
    }
    if fare.transit > 0.0 {
        parts.push(format!("Transit: RM {:.2}", fare.transit));
    }
    if fare.end_transport > 0.0 {
        parts.push(format!("{} (end): RM {:.2}", fare.end_type, fare.end_transport));
    }
    if !parts.is_empty() {
        insights.push(format!("Breakdown: {}", parts.join(" + ")));
    }
}

fn path_lines(path: &[Station], insights: &mut Vec<String>) {
    if path.is_empty() {
        return;
    }

    let stops = path.len() - 1;
    if stops > 0 {
        insights.push(format!(
            "~{} min on board across {stops} stops.",
            stops as u32 * MINUTES_PER_STOP
        ));
    }

    // distinct lines in travel order
    let mut lines: Vec<&RouteId> = Vec::new();
    for station in path {
        if !lines.contains(&&station.route_id) {
            lines.push(&station.route_id);
        }
    }
    let names: Vec<&str> = lines.iter().map(|r| r.as_str()).collect();
    match names.len() {
        1 => insights.push(format!("Single-line journey on {}.", names[0])),
        n => insights.push(format!(
            "Expect {} transfer(s) across {}.",
            n - 1,
            names.join(", ")
        )),
    }

    let crowded: Vec<&str> = path
        .iter()
        .filter(|s| s.crowd() >= CROWDED_THRESHOLD)
        .map(|s| s.name.as_str())
        .take(MAX_CROWDED_NAMES)
        .collect();
    if crowded.is_empty() {
        insights.push("Crowd levels look manageable along this route.".to_string());
    } else {
        insights.push(format!("Crowded near {}.", crowded.join(", ")));
    }
}

/// Insights for a priced path, most important first.
///
/// Covers the fare, on-board time, transfers, crowding, and long access legs.
pub fn build_insights(
    path: &[Station],
    start_walk_m: f64,
    dest_walk_m: f64,
    fare: &FareBreakdown,
) -> Vec<String> {
    let mut insights = Vec::new();
    fare_lines(fare, &mut insights);
    path_lines(path, &mut insights);

    if fare.start_type == LegMode::Grab {
        insights.push(format!(
            "Start: {} walk. Consider booking a Grab.",
            format_distance(start_walk_m)
        ));
    } else if start_walk_m > WALK_NOTE_M {
        insights.push(format!(
            "Walk about {} to reach your start station.",
            format_distance(start_walk_m)
        ));
    }

    if fare.end_type == LegMode::Grab {
        insights.push(format!(
            "Destination: {} walk. Consider booking a Grab.",
            format_distance(dest_walk_m)
        ));
    } else if dest_walk_m > WALK_NOTE_M {
        insights.push(format!(
            "Walk about {} after exiting.",
            format_distance(dest_walk_m)
        ));
    }

    insights
}

/// Error from a travel-tip source.
#[derive(Debug, thiserror::Error)]
pub enum AnnotatorError {
    #[error("tip service unavailable: {0}")]
    Unavailable(String),
}

/// Optional source of a free-form travel tip for a planned journey.
///
/// Best effort: a failure never fails the journey.
pub trait TipAnnotator: Send + Sync {
    fn travel_tip(
        &self,
        journey: &Journey,
    ) -> impl Future<Output = Result<Option<String>, AnnotatorError>> + Send;
}
