//! Free-text query resolution.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::Station;
use crate::geo::Coords;
use crate::geocode::Geocoder;
use crate::network::Network;

use super::matcher::find_station_by_name;

/// Which step of resolution produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Explicit station-name match
    Station,
    /// Literal `lat, lng` in the query
    Coords,
    /// External geocoder
    Geocode,
}

/// A resolved query: the point the user meant, plus the nearest station.
///
/// `station` is `None` only when the network has no stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub station: Option<Station>,
    pub coords: Coords,
    pub source: ResolutionSource,
}

impl Resolution {
    fn snapped(network: &Network, coords: Coords, source: ResolutionSource) -> Self {
        Self {
            station: network.find_nearest_station(coords.lat, coords.lng).cloned(),
            coords,
            source,
        }
    }
}

static COORDINATE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?[0-9]+(?:\.[0-9]+)?)\s*,\s*(-?[0-9]+(?:\.[0-9]+)?)$")
        .expect("coordinate pattern is valid")
});

/// Parse `"<lat>, <lng>"` where each side is an optionally negative decimal.
/// Whitespace is allowed around the comma only; the caller trims the ends.
///
/// ```
/// use transit_planner::matching::parse_coordinate_pair;
///
/// let c = parse_coordinate_pair("3.1579, 101.7116").unwrap();
/// assert_eq!((c.lat, c.lng), (3.1579, 101.7116));
/// assert!(parse_coordinate_pair("3.1579 101.7116").is_none());
/// assert!(parse_coordinate_pair("+3, 101").is_none());
/// ```
pub fn parse_coordinate_pair(text: &str) -> Option<Coords> {
    let caps = COORDINATE_PAIR.captures(text)?;
    let lat = caps[1].parse().ok()?;
    let lng = caps[2].parse().ok()?;
    Coords::checked(lat, lng)
}

/// Resolve a free-text query to a point and its nearest station.
///
/// Tried in order, first success wins:
/// 1. an explicit station-name match (see [`find_station_by_name`]);
/// 2. a literal coordinate pair, snapped to the nearest station;
/// 3. the geocoder, its hit snapped to the nearest station.
///
/// Every failure, including geocoder errors, yields `None`. The geocoder is
/// asked at most once.
pub async fn resolve_query<G: Geocoder>(
    network: &Network,
    query: &str,
    geocoder: &G,
) -> Option<Resolution> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    if let Some(m) = find_station_by_name(network, query) {
        return Some(Resolution {
            station: Some(m.station.clone()),
            coords: m.station.coords(),
            source: ResolutionSource::Station,
        });
    }

    if let Some(coords) = parse_coordinate_pair(query) {
        debug!(lat = coords.lat, lng = coords.lng, "Query is a coordinate pair");
        return Some(Resolution::snapped(network, coords, ResolutionSource::Coords));
    }

    let hit = match geocoder.geocode(query).await {
        Ok(Some(hit)) => hit,
        Ok(None) => {
            warn!(query, "Geocoder found nothing");
            return None;
        }
        Err(e) => {
            warn!(query, error = %e, "Geocoding failed");
            return None;
        }
    };

    let Some(coords) = hit.coords() else {
        warn!(query, ?hit, "Geocoder result has no usable coordinates");
        return None;
    };

    debug!(query, lat = coords.lat, lng = coords.lng, "Geocoded query");
    Some(Resolution::snapped(network, coords, ResolutionSource::Geocode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::{GeocodeError, GeocodeHit, NoGeocoder};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory geocoder that counts its calls.
    #[derive(Default)]
    struct MockGeocoder {
        places: HashMap<String, GeocodeHit>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl MockGeocoder {
        fn with_place(mut self, query: &str, hit: GeocodeHit) -> Self {
            self.places.insert(query.to_string(), hit);
            self
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Geocoder for MockGeocoder {
        async fn geocode(&self, query: &str) -> Result<Option<GeocodeHit>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GeocodeError::Api {
                    status: 503,
                    message: "unavailable".into(),
                });
            }
            Ok(self.places.get(query).cloned())
        }
    }

    fn network() -> Network {
        Network::new(vec![
            Station::new("KJ10", "KLCC", "KJ", 3.1590, 101.7133),
            Station::new("KJ11", "Kampung Baru", "KJ", 3.1613, 101.7064),
            Station::new("KJ14", "Pasar Seni", "KJ", 3.1424, 101.6954),
        ])
    }

    #[test]
    fn coordinate_pairs() {
        assert_eq!(
            parse_coordinate_pair("3.1579,101.7116"),
            Some(Coords::new(3.1579, 101.7116))
        );
        assert_eq!(
            parse_coordinate_pair("-3 ,  -101"),
            Some(Coords::new(-3.0, -101.0))
        );
        assert_eq!(parse_coordinate_pair("3, 101"), Some(Coords::new(3.0, 101.0)));
    }

    #[test]
    fn malformed_coordinate_pairs() {
        for text in [
            "", ",", "3.,101", "3,.5", "3.1.2,101", "3,101,5", "abc,def", "3", "1e3,2",
            " 3,101", "3,101 ", "--3,101", "3, -",
        ] {
            assert!(parse_coordinate_pair(text).is_none(), "{text:?} parsed");
        }
    }

    #[tokio::test]
    async fn station_name_with_intent() {
        let network = network();
        let geocoder = MockGeocoder::default();
        let res = resolve_query(&network, "LRT KLCC", &geocoder).await.unwrap();

        assert_eq!(res.source, ResolutionSource::Station);
        assert_eq!(res.station.unwrap().id.as_str(), "KJ10");
        assert_eq!(res.coords, Coords::new(3.1590, 101.7133));
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn bare_name_goes_to_geocoder() {
        let network = network();
        let geocoder = MockGeocoder::default()
            .with_place("KLCC", GeocodeHit::at(3.1579, 101.7116).with_name("Suria KLCC"));

        let res = resolve_query(&network, "KLCC", &geocoder).await.unwrap();
        assert_eq!(res.source, ResolutionSource::Geocode);
        assert_eq!(res.coords, Coords::new(3.1579, 101.7116));
        assert_eq!(res.station.unwrap().id.as_str(), "KJ10");
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn coordinates_keep_literal_point() {
        let network = network();
        let geocoder = MockGeocoder::default();
        let res = resolve_query(&network, " 3.1425, 101.6950 ", &geocoder)
            .await
            .unwrap();

        assert_eq!(res.source, ResolutionSource::Coords);
        assert_eq!(res.coords, Coords::new(3.1425, 101.6950));
        assert_eq!(res.station.unwrap().id.as_str(), "KJ14");
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn coordinates_on_empty_network() {
        let res = resolve_query(&Network::empty(), "3.0, 101.0", &NoGeocoder)
            .await
            .unwrap();
        assert_eq!(res.source, ResolutionSource::Coords);
        assert!(res.station.is_none());
    }

    #[tokio::test]
    async fn geocoder_hit_with_string_fields() {
        let hit: GeocodeHit =
            serde_json::from_str(r#"{"lat": "3.1610", "lon": "101.7060"}"#).unwrap();
        let geocoder = MockGeocoder::default().with_place("Kampung Baru Market", hit);

        let res = resolve_query(&network(), "Kampung Baru Market", &geocoder)
            .await
            .unwrap();
        assert_eq!(res.station.unwrap().id.as_str(), "KJ11");
    }

    #[tokio::test]
    async fn geocoder_error_yields_none() {
        let geocoder = MockGeocoder::failing();
        assert!(resolve_query(&network(), "Pavilion", &geocoder).await.is_none());
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn geocoder_miss_yields_none() {
        assert!(resolve_query(&network(), "Nowhere", &NoGeocoder).await.is_none());
    }

    #[tokio::test]
    async fn geocoder_hit_without_coordinates_yields_none() {
        let geocoder = MockGeocoder::default()
            .with_place("Somewhere", GeocodeHit::default().with_name("Somewhere"));
        assert!(resolve_query(&network(), "Somewhere", &geocoder).await.is_none());
    }

    #[tokio::test]
    async fn unmatched_station_intent_falls_through() {
        // Intent declared but no station is close enough: the geocoder decides.
        let geocoder = MockGeocoder::default()
            .with_place("lrt putrajaya sentral", GeocodeHit::at(2.9, 101.7));
        let res = resolve_query(&network(), "lrt putrajaya sentral", &geocoder)
            .await
            .unwrap();
        assert_eq!(res.source, ResolutionSource::Geocode);
    }

    #[tokio::test]
    async fn blank_query() {
        let geocoder = MockGeocoder::default();
        assert!(resolve_query(&network(), "   ", &geocoder).await.is_none());
        assert_eq!(geocoder.calls(), 0);
    }
}
