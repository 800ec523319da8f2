//! Application state for the web layer.

use std::sync::Arc;

use crate::crowd::CrowdEstimator;
use crate::fare::FareConfig;
use crate::geocode::{Geocoder, NominatimGeocoder};
use crate::network::SharedNetwork;
use crate::planner::PathConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests. The geocoder is a
/// type parameter so handlers can be exercised with an in-memory one.
pub struct AppState<G = NominatimGeocoder> {
    /// Current station network
    pub network: SharedNetwork,

    /// Free-text location lookup
    pub geocoder: Arc<G>,

    /// Crowd model, re-applied after a dataset reload
    pub crowd: Arc<CrowdEstimator>,

    pub path_config: Arc<PathConfig>,

    pub fare_config: Arc<FareConfig>,
}

impl<G: Geocoder> AppState<G> {
    /// Create a new app state with default routing and fare rules.
    pub fn new(network: SharedNetwork, geocoder: G, crowd: CrowdEstimator) -> Self {
        Self {
            network,
            geocoder: Arc::new(geocoder),
            crowd: Arc::new(crowd),
            path_config: Arc::new(PathConfig::default()),
            fare_config: Arc::new(FareConfig::default()),
        }
    }

    pub fn with_path_config(mut self, config: PathConfig) -> Self {
        self.path_config = Arc::new(config);
        self
    }

    pub fn with_fare_config(mut self, config: FareConfig) -> Self {
        self.fare_config = Arc::new(config);
        self
    }
}

// Manual impl: only the `Arc`s are cloned, so `G` need not be `Clone`.
impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            network: self.network.clone(),
            geocoder: Arc::clone(&self.geocoder),
            crowd: Arc::clone(&self.crowd),
            path_config: Arc::clone(&self.path_config),
            fare_config: Arc::clone(&self.fare_config),
        }
    }
}
