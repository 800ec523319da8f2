//! Interchange detection between lines.

use tracing::debug;

use crate::domain::Station;

use super::context::Network;

/// Stations on different lines closer than this are treated as one
/// interchange when building the graph.
pub const INTERCHANGE_RADIUS_M: f64 = 250.0;

/// Search radius for [`find_transfer_point`] when no name matches.
pub const TRANSFER_SEARCH_RADIUS_M: f64 = 500.0;

/// Graph edge rule for two stations on different lines.
///
/// Connected when the normalized names are identical and non-empty, or
/// when the stations are less than [`INTERCHANGE_RADIUS_M`] apart. This is a
/// proxy for "same interchange complex", not a physical guarantee.
pub fn is_interchange(a: &Station, b: &Station) -> bool {
    let name_a = a.normalized_name();
    let same_name = !name_a.is_empty() && name_a == b.normalized_name();

    same_name || a.distance_to(&b.coords()) < INTERCHANGE_RADIUS_M
}

/// Name key for transfer lookup: uppercased, trimmed, inner whitespace
/// collapsed.
fn transfer_name(station: &Station) -> String {
    station
        .name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Find the best interchange pair between the lines of `a` and `b`.
///
/// Looks at every station on each line. Prefers the first pair with the
/// same normalized name (not necessarily the closest); otherwise the
/// closest pair under [`TRANSFER_SEARCH_RADIUS_M`]. Returns `None` if
/// neither exists.
///
/// The path finder does not use this; it explains why two lines connect.
pub fn find_transfer_point<'a>(
    network: &'a Network,
    a: &Station,
    b: &Station,
) -> Option<(&'a Station, &'a Station)> {
    let line_a: Vec<&Station> = network.line_stations(&a.route_id).collect();
    let line_b: Vec<&Station> = network.line_stations(&b.route_id).collect();

    for sa in &line_a {
        let name = transfer_name(sa);
        if name.is_empty() {
            continue;
        }
        if let Some(sb) = line_b.iter().find(|sb| transfer_name(sb) == name) {
            debug!(from = %sa.id, to = %sb.id, "Found transfer point by name");
            return Some((sa, sb));
        }
    }

    let mut best: Option<(&Station, &Station, f64)> = None;
    for sa in &line_a {
        for sb in &line_b {
            let dist = sa.distance_to(&sb.coords());
            if dist < TRANSFER_SEARCH_RADIUS_M && best.is_none_or(|(_, _, d)| dist < d) {
                best = Some((sa, sb, dist));
            }
        }
    }

    match best {
        Some((sa, sb, dist)) => {
            debug!(
                from = %sa.name,
                to = %sb.name,
                distance_m = dist.round(),
                "Found transfer point by proximity"
            );
            Some((sa, sb))
        }
        None => {
            debug!(
                from_line = %a.route_id,
                to_line = %b.route_id,
                "No transfer point found"
            );
            None
        }
    }
}
