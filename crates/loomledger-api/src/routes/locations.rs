//! Business location endpoints
//!
//! Endpoints:
//! - api_locations: List partitions and the active one
//! - api_location_store: Register a new partition
//! - api_location_activate: Switch the active partition

use axum::extract::State;
use axum::Json;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct LocationsResponse {
    pub names: Vec<String>,
    pub active: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationPayload {
    pub name: String,
}

/// List locations (JSON API)
pub async fn api_locations(State(state): State<AppState>) -> Json<LocationsResponse> {
    Json(LocationsResponse {
        names: state.locations.names(),
        active: state.locations.active(),
    })
}

/// Register a new location (JSON API)
///
/// The new partition becomes active immediately, with an empty ledger and
/// empty category set.
pub async fn api_location_store(
    State(state): State<AppState>,
    Json(payload): Json<LocationPayload>,
) -> Result<Json<LocationsResponse>, ApiError> {
    state.locations.add(&payload.name).await?;
    state.locations.activate(&payload.name)?;
    state.ledger.switch_location(&payload.name).await?;
    info!("Location registered and activated: {}", payload.name);
    Ok(Json(LocationsResponse {
        names: state.locations.names(),
        active: state.locations.active(),
    }))
}

/// Switch the active location (JSON API)
///
/// The ledger snapshot is cleared and reloaded under the new partition;
/// rows from the previous one are never served in between.
pub async fn api_location_activate(
    State(state): State<AppState>,
    Json(payload): Json<LocationPayload>,
) -> Result<Json<LocationsResponse>, ApiError> {
    state.locations.activate(&payload.name)?;
    state.ledger.switch_location(&payload.name).await?;
    info!("Active location switched to {}", payload.name);
    Ok(Json(LocationsResponse {
        names: state.locations.names(),
        active: state.locations.active(),
    }))
}
