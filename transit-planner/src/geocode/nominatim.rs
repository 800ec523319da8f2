//! Nominatim (OpenStreetMap) geocoding client.

use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use tracing::debug;

use super::error::GeocodeError;
use super::provider::Geocoder;
use super::types::{GeocodeHit, LooseNumber};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// One entry of Nominatim's `search` response.
#[derive(Debug, Clone, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

impl From<NominatimPlace> for GeocodeHit {
    fn from(place: NominatimPlace) -> Self {
        GeocodeHit {
            lat: Some(LooseNumber::Text(place.lat)),
            lon: Some(LooseNumber::Text(place.lon)),
            name: place.name.filter(|n| !n.is_empty()),
            display_name: place.display_name,
            ..GeocodeHit::default()
        }
    }
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL, without the trailing `/search`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Nominatim's usage policy requires an identifying agent
    pub user_agent: String,
    /// Optional `countrycodes` filter, e.g. `"my"`
    pub country_codes: Option<String>,
    /// How long answers (including "not found") stay cached
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            user_agent: concat!("transit-planner/", env!("CARGO_PKG_VERSION")).to_string(),
            country_codes: None,
            cache_ttl: Duration::from_secs(24 * 3600),
            cache_capacity: 1_000,
        }
    }
}

impl NominatimConfig {
    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn with_country_codes(mut self, codes: impl Into<String>) -> Self {
        self.country_codes = Some(codes.into());
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }
}

/// Geocoder backed by a Nominatim `search` endpoint.
///
/// Answers are cached per lowercased query, so repeated lookups of the same
/// place do not hit the service again until the TTL expires.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: reqwest::Client,
    config: NominatimConfig,
    cache: Cache<String, Option<GeocodeHit>>,
}

impl NominatimGeocoder {
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        if config.user_agent.trim().is_empty() {
            return Err(GeocodeError::Config("user agent must not be empty".into()));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            http,
            config,
            cache,
        })
    }

    pub fn config(&self) -> &NominatimConfig {
        &self.config
    }

    async fn search(&self, query: &str) -> Result<Option<GeocodeHit>, GeocodeError> {
        let mut params = vec![("format", "json"), ("limit", "1"), ("q", query)];
        if let Some(codes) = &self.config.country_codes {
            params.push(("countrycodes", codes.as_str()));
        }

        let response = self
            .http
            .get(self.config.search_url())
            .query(&params)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let places = parse_search_response(&body)?;

        Ok(places.into_iter().next().map(GeocodeHit::from))
    }
}

fn parse_search_response(body: &str) -> Result<Vec<NominatimPlace>, GeocodeError> {
    serde_json::from_str(body).map_err(|e| GeocodeError::Json {
        message: e.to_string(),
    })
}

impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodeHit>, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let key = query.to_lowercase();
        if let Some(cached) = self.cache.get(&key).await {
            debug!(query, hit = cached.is_some(), "Geocode cache hit");
            return Ok(cached);
        }

        let result = self.search(query).await?;
        debug!(query, found = result.is_some(), "Geocoded query");
        self.cache.insert(key, result.clone()).await;

        Ok(result)
    }
}
