//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{error, info, warn};

use crate::dataset::DatasetError;
use crate::domain::{StationId, current_hour};
use crate::geo::Coords;
use crate::geocode::Geocoder;
use crate::journey::{Journey, JourneyPlanner, PlanError};
use crate::matching::{Resolution, resolve_query};
use crate::network::find_transfer_point;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<G: Geocoder + 'static>(state: AppState<G>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/journey/plan", post(plan_journey::<G>))
        .route("/api/stations/nearest", get(nearest_station::<G>))
        .route("/api/stations/search", get(search_stations::<G>))
        .route("/api/transfer", get(transfer_point::<G>))
        .route("/api/network/reload", post(reload_network::<G>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan a journey between two free-text locations.
async fn plan_journey<G: Geocoder>(
    State(state): State<AppState<G>>,
    body: Bytes,
) -> Result<Json<Journey>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanJourneyRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    if req.origin.trim().is_empty() || req.destination.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "Please enter both origin and destination".to_string(),
        });
    }

    let hour = match req.hour {
        Some(h) if h > 23 => {
            return Err(AppError::BadRequest {
                message: format!("Invalid hour: {h}"),
            });
        }
        Some(h) => h,
        None => current_hour(),
    };

    let network = state.network.snapshot().await;
    if network.is_empty() {
        return Err(AppError::Internal {
            message: "Station data is not loaded".to_string(),
        });
    }

    let planner = JourneyPlanner::new(&network, &state.path_config, &state.fare_config);
    let journey = planner
        .plan(&req.origin, &req.destination, &*state.geocoder, hour)
        .await?;

    Ok(Json(journey))
}

/// Nearest station to a coordinate.
async fn nearest_station<G: Geocoder>(
    State(state): State<AppState<G>>,
    Query(req): Query<NearestStationRequest>,
) -> Result<Json<NearestStationResponse>, AppError> {
    let coords = Coords::checked(req.lat, req.lng).ok_or_else(|| AppError::BadRequest {
        message: "Coordinates must be finite numbers".to_string(),
    })?;

    let network = state.network.snapshot().await;
    let station = network
        .find_nearest_station(coords.lat, coords.lng)
        .ok_or_else(|| AppError::NotFound {
            message: "No stations loaded".to_string(),
        })?;

    Ok(Json(NearestStationResponse {
        distance_m: station.distance_to(&coords),
        station: station.clone(),
    }))
}

/// Resolve a free-text query the way journey planning does.
async fn search_stations<G: Geocoder>(
    State(state): State<AppState<G>>,
    Query(req): Query<StationSearchRequest>,
) -> Result<Json<Resolution>, AppError> {
    if req.q.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "Query must not be empty".to_string(),
        });
    }

    let network = state.network.snapshot().await;
    resolve_query(&network, &req.q, &*state.geocoder)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Could not locate {:?}", req.q),
        })
}

/// Interchange between the lines of two stations.
async fn transfer_point<G: Geocoder>(
    State(state): State<AppState<G>>,
    Query(req): Query<TransferRequest>,
) -> Result<Json<TransferResponse>, AppError> {
    let network = state.network.snapshot().await;

    let lookup = |id: &str| {
        network
            .station(&StationId::new(id))
            .ok_or_else(|| AppError::NotFound {
                message: format!("Unknown station: {id}"),
            })
    };
    let a = lookup(&req.from)?;
    let b = lookup(&req.to)?;

    let (from, to) = find_transfer_point(&network, a, b).ok_or_else(|| AppError::NotFound {
        message: format!("No transfer point between {} and {}", a.route_id, b.route_id),
    })?;

    Ok(Json(TransferResponse {
        distance_m: from.distance_to(&to.coords()),
        from: from.clone(),
        to: to.clone(),
    }))
}

/// Re-read the station dataset and re-apply crowd estimates.
async fn reload_network<G: Geocoder>(
    State(state): State<AppState<G>>,
) -> Result<Json<ReloadResponse>, AppError> {
    let hour = current_hour();
    let (stations, crowd_updated) = state
        .network
        .reload_with(|network| state.crowd.apply(network, hour))
        .await?;

    info!(stations, crowd_updated, "Reloaded network");
    Ok(Json(ReloadResponse {
        stations,
        crowd_updated,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e {
            PlanError::NoStationSpecified => AppError::Unprocessable { message },
            PlanError::Unresolved(_) | PlanError::NoNearbyStation(_) | PlanError::NoPath { .. } => {
                AppError::NotFound { message }
            }
        }
    }
}

impl From<DatasetError> for AppError {
    fn from(e: DatasetError) -> Self {
        match e {
            DatasetError::NoSource => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, error = %message, "Request failed");
        } else {
            warn!(%status, error = %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
