//! Undirected station adjacency graph.
//!
//! Edges come from two sources:
//! - consecutive stations along the same line, in line order
//! - pairs of stations on different lines that look like the same
//!   interchange (see [`is_interchange`])
//!
//! No weights are stored; traversal cost is derived from live station
//! state at search time.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::domain::{RouteId, Station, StationId};

use super::transfer::is_interchange;

/// Station adjacency, rebuilt wholesale from a station list.
#[derive(Debug, Clone, Default)]
pub struct StationGraph {
    adjacency: HashMap<StationId, BTreeSet<StationId>>,
}

impl StationGraph {
    /// Build the graph from a station list.
    ///
    /// Transfer inference compares every pair of stations on different
    /// lines, so this is quadratic in station count. That is fine for a
    /// city network of a few thousand stations; replacing it with a spatial
    /// index must keep the exact 250 m threshold semantics.
    pub fn build(stations: &[Station]) -> Self {
        let mut graph = Self::default();

        for line in group_by_line(stations).into_values() {
            let ordered = line_order(line);
            for pair in ordered.windows(2) {
                graph.add_edge(&pair[0].id, &pair[1].id);
            }
        }

        let line_edges = graph.edge_count();

        for (i, a) in stations.iter().enumerate() {
            for b in &stations[i + 1..] {
                if a.route_id != b.route_id && is_interchange(a, b) {
                    graph.add_edge(&a.id, &b.id);
                }
            }
        }

        debug!(
            stations = stations.len(),
            line_edges,
            transfer_edges = graph.edge_count() - line_edges,
            "Built station graph"
        );

        graph
    }

    /// Add an undirected edge. Self-loops and empty identifiers are ignored.
    fn add_edge(&mut self, a: &StationId, b: &StationId) {
        if a.is_empty() || b.is_empty() || a == b {
            return;
        }
        self.adjacency
            .entry(a.clone())
            .or_default()
            .insert(b.clone());
        self.adjacency
            .entry(b.clone())
            .or_default()
            .insert(a.clone());
    }

    /// Whether the station has at least one edge.
    pub fn contains(&self, id: &StationId) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Neighbors of a station in ascending identifier order.
    ///
    /// Returns `None` for stations with no edges.
    pub fn neighbors(&self, id: &StationId) -> Option<&BTreeSet<StationId>> {
        self.adjacency.get(id)
    }

    pub fn has_edge(&self, a: &StationId, b: &StationId) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(b))
    }

    /// Number of stations with at least one edge.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Group stations by line, preserving dataset order within each line.
fn group_by_line(stations: &[Station]) -> BTreeMap<&RouteId, Vec<&Station>> {
    let mut lines: BTreeMap<&RouteId, Vec<&Station>> = BTreeMap::new();
    for station in stations {
        lines.entry(&station.route_id).or_default().push(station);
    }
    lines
}

/// Sort a line's stations into physical stop order.
///
/// When every identifier carries a sequence number the line is ordered by
/// it (stable, so equal numbers keep dataset order). Otherwise the whole
/// line falls back to lexicographic identifier order.
pub(crate) fn line_order(mut line: Vec<&Station>) -> Vec<&Station> {
    if line.iter().all(|s| s.id.sequence_number().is_some()) {
        line.sort_by_key(|s| s.id.sequence_number());
    } else {
        line.sort_by(|a, b| a.id.cmp(&b.id));
    }
    line
}
