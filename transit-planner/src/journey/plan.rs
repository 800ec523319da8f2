//! End-to-end journey planning.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{Station, StationId, current_hour};
use crate::fare::{FareBreakdown, FareConfig};
use crate::geo::Coords;
use crate::geocode::Geocoder;
use crate::matching::{Resolution, ResolutionSource, resolve_query};
use crate::network::Network;
use crate::planner::{PathConfig, PathFinder};

use super::insights::{TIP_UNAVAILABLE, TipAnnotator, build_insights};
use super::summary::{JourneySummary, build_summary};

/// Which end of the journey an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Origin => f.write_str("origin"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Why a journey could not be planned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Query could not be located at all
    #[error("could not locate the {0}")]
    Unresolved(Endpoint),

    /// Neither endpoint resolved to a station
    #[error("no transit stations specified; use keywords like \"LRT\", \"MRT\" or \"station\"")]
    NoStationSpecified,

    /// An endpoint has no station to snap to
    #[error("no transit station near the {0}")]
    NoNearbyStation(Endpoint),

    /// The two stations are not connected
    #[error("no transit path from {from} to {to}")]
    NoPath { from: StationId, to: StationId },
}

/// One resolved end of a journey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyEndpoint {
    /// What the user typed
    pub query: String,
    pub coords: Coords,
    pub source: ResolutionSource,
    /// Station boarded at or alighted from
    pub station: Station,
    /// Access leg between `coords` and `station`, in meters
    pub walk_m: f64,
}

impl JourneyEndpoint {
    fn new(query: &str, resolution: Resolution, station: Station) -> Self {
        let walk_m = station.distance_to(&resolution.coords);
        Self {
            query: query.trim().to_string(),
            coords: resolution.coords,
            source: resolution.source,
            station,
            walk_m,
        }
    }
}

/// A planned, priced journey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journey {
    pub origin: JourneyEndpoint,
    pub destination: JourneyEndpoint,
    pub path: Vec<Station>,
    pub fare: FareBreakdown,
    pub summary: JourneySummary,
    pub insights: Vec<String>,
}

/// Plans journeys over one network snapshot.
pub struct JourneyPlanner<'a> {
    network: &'a Network,
    path_config: &'a PathConfig,
    fare_config: &'a FareConfig,
}

impl<'a> JourneyPlanner<'a> {
    pub fn new(network: &'a Network, path_config: &'a PathConfig, fare_config: &'a FareConfig) -> Self {
        Self {
            network,
            path_config,
            fare_config,
        }
    }

    /// [`plan`](Self::plan) at the current local hour.
    pub async fn plan_now<G: Geocoder>(
        &self,
        origin: &str,
        destination: &str,
        geocoder: &G,
    ) -> Result<Journey, PlanError> {
        self.plan(origin, destination, geocoder, current_hour()).await
    }

    /// Resolve both queries, route between their stations and price the trip.
    ///
    /// Origin and destination are resolved concurrently. If only one of them
    /// names a station, the other is snapped to the station nearest its
    /// location.
    pub async fn plan<G: Geocoder>(
        &self,
        origin: &str,
        destination: &str,
        geocoder: &G,
        hour: u32,
    ) -> Result<Journey, PlanError> {
        let (start, end) = tokio::join!(
            resolve_query(self.network, origin, geocoder),
            resolve_query(self.network, destination, geocoder),
        );

        let start = start.ok_or(PlanError::Unresolved(Endpoint::Origin))?;
        let end = end.ok_or(PlanError::Unresolved(Endpoint::Destination))?;

        if start.station.is_none() && end.station.is_none() {
            return Err(PlanError::NoStationSpecified);
        }

        let start_station = self.snap(&start, Endpoint::Origin)?;
        let end_station = self.snap(&end, Endpoint::Destination)?;

        let finder = PathFinder::new(self.network, self.path_config);
        let path = finder
            .find_path(&start_station, &end_station, hour)
            .ok_or_else(|| {
                warn!(from = %start_station.id, to = %end_station.id, "No transit path");
                PlanError::NoPath {
                    from: start_station.id.clone(),
                    to: end_station.id.clone(),
                }
            })?;

        let origin = JourneyEndpoint::new(origin, start, start_station);
        let destination = JourneyEndpoint::new(destination, end, end_station);

        let fare = self
            .fare_config
            .calculate(&path, origin.walk_m, destination.walk_m);
        let summary = build_summary(
            &origin.query,
            &destination.query,
            &path,
            origin.walk_m,
            destination.walk_m,
            &fare,
        );
        let insights = build_insights(&path, origin.walk_m, destination.walk_m, &fare);

        info!(
            from = %origin.station.id,
            to = %destination.station.id,
            stops = path.len(),
            fare = fare.total,
            hour,
            "Planned journey"
        );

        Ok(Journey {
            origin,
            destination,
            path,
            fare,
            summary,
            insights,
        })
    }

    fn snap(&self, resolution: &Resolution, endpoint: Endpoint) -> Result<Station, PlanError> {
        if let Some(station) = &resolution.station {
            return Ok(station.clone());
        }
        let coords = resolution.coords;
        self.network
            .find_nearest_station(coords.lat, coords.lng)
            .cloned()
            .ok_or(PlanError::NoNearbyStation(endpoint))
    }
}

/// Prepend a travel tip from `annotator`, or a notice if it fails.
pub async fn annotate<A: TipAnnotator>(journey: &mut Journey, annotator: &A) {
    match annotator.travel_tip(journey).await {
        Ok(Some(tip)) => {
            debug!("Added travel tip");
            journey.insights.insert(0, tip);
        }
        Ok(None) => {}
        Err(e) => {
            warn!(error = %e, "Travel tip unavailable");
            journey.insights.insert(0, TIP_UNAVAILABLE.to_string());
        }
    }
}
