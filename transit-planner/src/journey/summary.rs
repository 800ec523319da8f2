//! Segment-by-segment journey summary.

use serde::Serialize;

use crate::domain::Station;
use crate::fare::{FareBreakdown, LegMode};
use crate::geo::distance;

/// Walking pace used for access-leg estimates, meters per minute (~5 km/h).
pub const WALK_METERS_PER_MINUTE: f64 = 80.0;

/// Flat estimate for any ride-hailing leg, in minutes.
pub const GRAB_MINUTES: u32 = 15;

/// On-board time per hop between consecutive stations, in minutes.
pub const MINUTES_PER_STOP: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Walk,
    Grab,
    Transit,
}

impl From<LegMode> for SegmentKind {
    fn from(mode: LegMode) -> Self {
        match mode {
            LegMode::Walk => SegmentKind::Walk,
            LegMode::Grab => SegmentKind::Grab,
        }
    }
}

/// One leg of the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySegment {
    pub kind: SegmentKind,
    pub from: String,
    pub to: String,
    pub distance_m: f64,
    pub minutes: u32,
}

/// Access legs and transit, with overall distance and time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneySummary {
    pub segments: Vec<SummarySegment>,
    pub total_distance_m: f64,
    pub total_minutes: u32,
}

fn label(name: &str, fallback: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}

fn access_segment(kind: SegmentKind, from: String, to: String, meters: f64) -> SummarySegment {
    let minutes = match kind {
        SegmentKind::Grab => GRAB_MINUTES,
        _ => (meters / WALK_METERS_PER_MINUTE).ceil().max(0.0) as u32,
    };
    SummarySegment {
        kind,
        from,
        to,
        distance_m: meters,
        minutes,
    }
}

/// Length of a station path along its hops, in meters.
pub fn path_distance(path: &[Station]) -> f64 {
    path.windows(2)
        .map(|w| distance(w[0].lat, w[0].lng, w[1].lat, w[1].lng))
        .sum()
}

/// Describes a priced journey.
///
/// `origin` and `destination` label the user's endpoints (usually what they
/// typed). Access legs follow the modes already chosen in `fare`. The transit
/// segment is present only when the path has at least one hop.
pub fn build_summary(
    origin: &str,
    destination: &str,
    path: &[Station],
    start_walk_m: f64,
    dest_walk_m: f64,
    fare: &FareBreakdown,
) -> JourneySummary {
    let first = path.first().map_or("", |s| s.name.as_str());
    let last = path.last().map_or("", |s| s.name.as_str());

    let mut segments = vec![access_segment(
        fare.start_type.into(),
        label(origin, "Start"),
        label(first, "Station"),
        start_walk_m,
    )];

    if path.len() > 1 {
        segments.push(SummarySegment {
            kind: SegmentKind::Transit,
            from: label(first, "Station"),
            to: label(last, "Station"),
            distance_m: path_distance(path),
            minutes: (path.len() as u32 - 1) * MINUTES_PER_STOP,
        });
    }

    segments.push(access_segment(
        fare.end_type.into(),
        label(last, "Station"),
        label(destination, "Destination"),
        dest_walk_m,
    ));

    JourneySummary {
        total_distance_m: segments.iter().map(|s| s.distance_m).sum(),
        total_minutes: segments.iter().map(|s| s.minutes).sum(),
        segments,
    }
}
