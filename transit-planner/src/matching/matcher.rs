//! Explicit station-name matching.

use tracing::{debug, trace};

use crate::domain::Station;
use crate::network::Network;

use super::intent::{has_transit_intent, strip_keywords};
use super::resolve::parse_coordinate_pair;
use super::similarity::similarity;

/// Minimum similarity for a fuzzy station-name match.
pub const MATCH_THRESHOLD: f64 = 0.75;

/// A station picked by name, with its similarity score.
#[derive(Debug, Clone, Copy)]
pub struct StationMatch<'a> {
    pub station: &'a Station,
    pub score: f64,
}

/// Match a query against station display names.
///
/// Only queries that declare transit intent (see
/// [`has_transit_intent`](super::has_transit_intent)) are considered, and a
/// literal coordinate pair never matches. Intent keywords are stripped and
/// the remainder is compared with every station's lowercased name. An exact
/// name wins immediately; otherwise the best fuzzy score must reach
/// [`MATCH_THRESHOLD`]. On equal scores the earlier station is kept.
pub fn find_station_by_name<'a>(network: &'a Network, query: &str) -> Option<StationMatch<'a>> {
    if network.is_empty() {
        return None;
    }

    let raw = query.trim().to_lowercase();
    if raw.is_empty() || parse_coordinate_pair(&raw).is_some() {
        return None;
    }

    if !has_transit_intent(&raw) {
        trace!(query = %raw, "No transit intent, skipping station match");
        return None;
    }

    let cleaned = strip_keywords(&raw);
    if cleaned.is_empty() {
        return None;
    }

    let mut best: Option<StationMatch<'a>> = None;
    for station in network.stations() {
        let name = station.name.to_lowercase();
        if name.is_empty() {
            continue;
        }

        if name == cleaned {
            debug!(query = %cleaned, station = %station.id, "Exact station name match");
            return Some(StationMatch {
                station,
                score: 1.0,
            });
        }

        let score = similarity(&cleaned, &name);
        if best.is_none_or(|b| score > b.score) {
            best = Some(StationMatch { station, score });
        }
    }

    let best = best.filter(|m| m.score >= MATCH_THRESHOLD);
    match &best {
        Some(m) => debug!(
            query = %cleaned,
            station = %m.station.id,
            score = m.score,
            "Fuzzy station name match"
        ),
        None => debug!(query = %cleaned, "No station name close enough"),
    }
    best
}
