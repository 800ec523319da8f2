//! The station set together with its graph.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::domain::{RouteId, Station, StationId};
use crate::geo::Coords;

use super::graph::StationGraph;

/// A dataset snapshot: stations, an id index, and the adjacency graph.
///
/// This is the explicit context passed to the path finder and the station
/// matcher. It is replaced wholesale when the dataset reloads; only the
/// crowd fractions change in place.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stations: Vec<Station>,
    index: HashMap<StationId, usize>,
    graph: StationGraph,
}

impl Network {
    /// Build a network from a station list.
    ///
    /// Identifiers are expected to be unique. If one repeats, the later
    /// station wins the index entry.
    pub fn new(stations: Vec<Station>) -> Self {
        let mut index = HashMap::with_capacity(stations.len());
        for (pos, station) in stations.iter().enumerate() {
            if index.insert(station.id.clone(), pos).is_some() {
                warn!(station = %station.id, "Duplicate station id, keeping the later entry");
            }
        }

        let graph = StationGraph::build(&stations);

        info!(
            stations = stations.len(),
            connected = graph.node_count(),
            edges = graph.edge_count(),
            "Network built"
        );

        Self {
            stations,
            index,
            graph,
        }
    }

    /// An empty network (no stations, no edges).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn graph(&self) -> &StationGraph {
        &self.graph
    }

    /// Look up a station by id.
    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.index.get(id).map(|&pos| &self.stations[pos])
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// All stations on a line, in dataset order.
    pub fn line_stations<'a>(
        &'a self,
        route: &RouteId,
    ) -> impl Iterator<Item = &'a Station> + use<'a> {
        let route = route.clone();
        self.stations.iter().filter(move |s| s.route_id == route)
    }

    /// Number of stations on each line.
    pub fn line_sizes(&self) -> HashMap<&RouteId, usize> {
        let mut sizes = HashMap::new();
        for station in &self.stations {
            *sizes.entry(&station.route_id).or_insert(0) += 1;
        }
        sizes
    }

    /// Update one station's crowd fraction. Returns false for unknown ids.
    pub fn set_crowd(&mut self, id: &StationId, crowd: f64) -> bool {
        match self.index.get(id) {
            Some(&pos) => {
                self.stations[pos].set_crowd(crowd);
                true
            }
            None => false,
        }
    }

    /// Mutable access to every station, for bulk crowd updates.
    pub(crate) fn stations_mut(&mut self) -> &mut [Station] {
        &mut self.stations
    }

    /// The station closest to a point, by linear scan.
    ///
    /// Returns `None` only when the network has no stations. On exact ties
    /// the first station in dataset order wins.
    pub fn find_nearest_station(&self, lat: f64, lng: f64) -> Option<&Station> {
        let target = Coords::new(lat, lng);
        let mut nearest: Option<(&Station, f64)> = None;

        for station in &self.stations {
            let dist = station.distance_to(&target);
            if nearest.is_none_or(|(_, best)| dist < best) {
                nearest = Some((station, dist));
            }
        }

        nearest.map(|(station, _)| station)
    }
}
