//! Crowd-aware shortest path search.
//!
//! Dijkstra over the station graph. Edge weights are not stored in the
//! graph; they are computed on the fly from the entered station's crowd
//! fraction and the query hour, see [`PathConfig::edge_cost`].

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, trace};

use crate::domain::{Station, StationId, current_hour};
use crate::network::Network;

use super::config::PathConfig;

/// Total-ordered path cost for the priority queue.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Path finder over one network snapshot.
pub struct PathFinder<'a> {
    network: &'a Network,
    config: &'a PathConfig,
}

impl<'a> PathFinder<'a> {
    pub fn new(network: &'a Network, config: &'a PathConfig) -> Self {
        Self { network, config }
    }

    /// Find a least-cost station sequence using the current wall-clock hour.
    pub fn find_path_now(&self, start: &Station, dest: &Station) -> Option<Vec<Station>> {
        self.find_path(start, dest, current_hour())
    }

    /// Find a least-cost station sequence from `start` to `dest`.
    ///
    /// Returns `None` if either station has no edges in the graph (not
    /// built yet, or orphaned) or if `dest` is unreachable. A station
    /// present in the graph routed to itself yields a one-element path.
    ///
    /// When several frontier entries share the minimum cost, the one with
    /// the lowest station id is settled first. This decides which of
    /// several equal-cost paths is returned.
    pub fn find_path(&self, start: &Station, dest: &Station, hour: u32) -> Option<Vec<Station>> {
        let graph = self.network.graph();
        if !graph.contains(&start.id) || !graph.contains(&dest.id) {
            debug!(start = %start.id, dest = %dest.id, "Station not in graph");
            return None;
        }

        if start.id == dest.id {
            return Some(vec![self.network.station(&start.id)?.clone()]);
        }

        let mut best: HashMap<&StationId, f64> = HashMap::new();
        let mut previous: HashMap<&StationId, &StationId> = HashMap::new();
        let mut settled: HashSet<&StationId> = HashSet::new();
        let mut frontier: BinaryHeap<Reverse<(Cost, &StationId)>> = BinaryHeap::new();

        best.insert(&start.id, 0.0);
        frontier.push(Reverse((Cost(0.0), &start.id)));

        while let Some(Reverse((Cost(cost), current))) = frontier.pop() {
            if !settled.insert(current) {
                continue;
            }
            if current == &dest.id {
                break;
            }

            let Some(neighbors) = graph.neighbors(current) else {
                continue;
            };

            for neighbor in neighbors {
                if settled.contains(neighbor) {
                    continue;
                }
                let Some(station) = self.network.station(neighbor) else {
                    continue;
                };

                let candidate = cost + self.config.edge_cost(station, hour);
                if best.get(neighbor).is_none_or(|&known| candidate < known) {
                    best.insert(neighbor, candidate);
                    previous.insert(neighbor, current);
                    frontier.push(Reverse((Cost(candidate), neighbor)));
                }
            }
        }

        trace!(settled = settled.len(), "Search finished");

        let path = self.reconstruct(&previous, &dest.id)?;
        if path.first().map(|s| &s.id) != Some(&start.id) {
            debug!(start = %start.id, dest = %dest.id, "No path between stations");
            return None;
        }

        debug!(
            start = %start.id,
            dest = %dest.id,
            stops = path.len() - 1,
            cost = best.get(&dest.id).copied().unwrap_or_default(),
            peak = self.config.is_peak_hour(hour),
            "Found path"
        );

        Some(path)
    }

    /// Walk predecessor links back from `dest`.
    fn reconstruct(
        &self,
        previous: &HashMap<&StationId, &StationId>,
        dest: &StationId,
    ) -> Option<Vec<Station>> {
        let mut path = Vec::new();
        let mut current = dest;

        loop {
            path.push(self.network.station(current)?.clone());
            match previous.get(current) {
                Some(prev) => current = prev,
                None => break,
            }
        }

        path.reverse();
        Some(path)
    }
}
