//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Station;

/// Request to plan a journey.
#[derive(Debug, Deserialize)]
pub struct PlanJourneyRequest {
    /// Free-text origin: place, "LRT <station>", or "lat, lng"
    pub origin: String,

    /// Free-text destination, same forms as origin
    pub destination: String,

    /// Hour of day (0-23) to plan for; defaults to now
    pub hour: Option<u32>,
}

/// Query for the nearest station.
#[derive(Debug, Deserialize)]
pub struct NearestStationRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Nearest station with its distance from the query point.
#[derive(Debug, Serialize)]
pub struct NearestStationResponse {
    pub station: Station,
    pub distance_m: f64,
}

/// Query for free-text location lookup.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Query string
    pub q: String,
}

/// Query for the transfer point between two stations' lines.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Station id on the first line
    pub from: String,
    /// Station id on the second line
    pub to: String,
}

/// Interchange pair between two lines.
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub from: Station,
    pub to: Station,
    pub distance_m: f64,
}

/// Result of a dataset reload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub stations: usize,
    pub crowd_updated: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_request_hour_optional() {
        let req: PlanJourneyRequest =
            serde_json::from_str(r#"{"origin": "LRT KLCC", "destination": "Pavilion"}"#).unwrap();
        assert_eq!(req.origin, "LRT KLCC");
        assert!(req.hour.is_none());

        let req: PlanJourneyRequest =
            serde_json::from_str(r#"{"origin": "a", "destination": "b", "hour": 18}"#).unwrap();
        assert_eq!(req.hour, Some(18));
    }

    #[test]
    fn plan_request_requires_both_ends() {
        assert!(serde_json::from_str::<PlanJourneyRequest>(r#"{"origin": "a"}"#).is_err());
    }

    #[test]
    fn nearest_response_shape() {
        let resp = NearestStationResponse {
            station: Station::new("KJ10", "KLCC", "KJ", 3.159, 101.7133),
            distance_m: 12.5,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["station"]["id"], "KJ10");
        assert_eq!(json["station"]["route_id"], "KJ");
        assert_eq!(json["station"]["crowd"], 0.0);
        assert_eq!(json["distance_m"], 12.5);
    }

    #[test]
    fn error_response_shape() {
        let json = serde_json::to_string(&ErrorResponse {
            error: "nope".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"error":"nope"}"#);
    }
}
