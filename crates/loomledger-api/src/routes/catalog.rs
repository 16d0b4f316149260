//! Catalog endpoints for weavers, looms, and designs
//!
//! Endpoints:
//! - api_catalog: Filtered view of all three record lists
//! - api_weaver_store / api_weaver_update: Weaver records
//! - api_loom_store / api_loom_update: Loom records
//! - api_design_store / api_design_update: Design records
//! - api_loom_slot_options: Valid slot numbers under a loom name
//! - api_enum_values: Members of an open enumeration set

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ApiError;
use crate::AppState;
use loomledger_catalog::{
    CatalogCriteria, CatalogView, Design, DesignFields, DesignSubmission, EnumKind, Loom,
    LoomFields, LoomSubmission, Weaver, WeaverFields,
};

fn catalog_criteria(params: &HashMap<String, String>) -> Result<CatalogCriteria, ApiError> {
    let loom_slot = match params.get("loom_slot") {
        None => None,
        Some(raw) => Some(raw.parse::<u32>().map_err(|_| ApiError::BadRequest {
            message: format!("loom_slot is not a number: {}", raw),
        })?),
    };
    Ok(CatalogCriteria {
        loom_name: params.get("loom_name").filter(|n| !n.is_empty()).cloned(),
        loom_slot,
    })
}

/// Get the filtered catalog view (JSON API)
pub async fn api_catalog(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<CatalogView>, ApiError> {
    let criteria = catalog_criteria(&params)?;
    Ok(Json(state.catalog.view(&criteria).await))
}

// ==================== Weavers ====================

/// List weavers (JSON API)
pub async fn api_weavers(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Weaver>>, ApiError> {
    let criteria = catalog_criteria(&params)?;
    Ok(Json(state.catalog.view(&criteria).await.weavers))
}

/// Record a new weaver (JSON API)
pub async fn api_weaver_store(
    State(state): State<AppState>,
    Json(fields): Json<WeaverFields>,
) -> Result<Json<Weaver>, ApiError> {
    let created = state.catalog.submit_weaver(fields).await?;
    Ok(Json(created))
}

/// Amend a weaver (JSON API, admin gated)
pub async fn api_weaver_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(fields): Json<WeaverFields>,
) -> Result<Json<Weaver>, ApiError> {
    crate::require_admin(&state, &headers).await?;
    let amended = state.catalog.amend_weaver(&id, fields).await?;
    Ok(Json(amended))
}

// ==================== Looms ====================

/// Loom payload with optional companions for the "other" sentinel
#[derive(Debug, Clone, Deserialize)]
pub struct LoomPayload {
    #[serde(flatten)]
    pub fields: LoomFields,
    #[serde(default)]
    pub new_loom_type: Option<String>,
    #[serde(default)]
    pub new_jacquard_type: Option<String>,
}

impl From<LoomPayload> for LoomSubmission {
    fn from(payload: LoomPayload) -> Self {
        Self {
            fields: payload.fields,
            new_loom_type: payload.new_loom_type,
            new_jacquard_type: payload.new_jacquard_type,
        }
    }
}

/// List looms (JSON API)
pub async fn api_looms(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Loom>>, ApiError> {
    let criteria = catalog_criteria(&params)?;
    Ok(Json(state.catalog.view(&criteria).await.looms))
}

/// Record a new loom (JSON API)
pub async fn api_loom_store(
    State(state): State<AppState>,
    Json(payload): Json<LoomPayload>,
) -> Result<Json<Loom>, ApiError> {
    let created = state.catalog.submit_loom(payload.into()).await?;
    Ok(Json(created))
}

/// Amend a loom (JSON API, admin gated)
pub async fn api_loom_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<LoomPayload>,
) -> Result<Json<Loom>, ApiError> {
    crate::require_admin(&state, &headers).await?;
    let amended = state.catalog.amend_loom(&id, payload.into()).await?;
    Ok(Json(amended))
}

// ==================== Designs ====================

/// Design payload with an optional companion for the "other" sentinel
#[derive(Debug, Clone, Deserialize)]
pub struct DesignPayload {
    #[serde(flatten)]
    pub fields: DesignFields,
    #[serde(default)]
    pub new_design_name: Option<String>,
}

impl From<DesignPayload> for DesignSubmission {
    fn from(payload: DesignPayload) -> Self {
        Self {
            fields: payload.fields,
            new_design_name: payload.new_design_name,
        }
    }
}

/// List designs (JSON API)
pub async fn api_designs(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Design>>, ApiError> {
    let criteria = catalog_criteria(&params)?;
    Ok(Json(state.catalog.view(&criteria).await.designs))
}

/// Record a new design (JSON API)
pub async fn api_design_store(
    State(state): State<AppState>,
    Json(payload): Json<DesignPayload>,
) -> Result<Json<Design>, ApiError> {
    let created = state.catalog.submit_design(payload.into()).await?;
    Ok(Json(created))
}

/// Amend a design (JSON API, admin gated)
pub async fn api_design_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<DesignPayload>,
) -> Result<Json<Design>, ApiError> {
    crate::require_admin(&state, &headers).await?;
    let amended = state.catalog.amend_design(&id, payload.into()).await?;
    Ok(Json(amended))
}

// ==================== Options ====================

/// Get the slot numbers available under a loom name (JSON API)
///
/// An unknown name yields an empty list, not an error; the client shows
/// an empty dropdown rather than a failure.
pub async fn api_loom_slot_options(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<u32>>, ApiError> {
    let loom_name = params.get("loom_name").ok_or(ApiError::BadRequest {
        message: "loom_name is required".to_string(),
    })?;
    Ok(Json(state.catalog.slot_options(loom_name).await))
}

/// Get loom names for parent dropdowns (JSON API)
pub async fn api_loom_names(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.loom_names().await)
}

/// Get the members of an open enumeration set (JSON API)
pub async fn api_enum_values(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let kind = kind
        .parse::<EnumKind>()
        .map_err(|message| ApiError::BadRequest { message })?;
    Ok(Json(state.catalog.enums().values(kind)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_criteria_parsing() {
        let mut params = HashMap::new();
        params.insert("loom_name".to_string(), "LoomA".to_string());
        params.insert("loom_slot".to_string(), "2".to_string());
        let criteria = catalog_criteria(&params).unwrap();
        assert_eq!(criteria.loom_name.as_deref(), Some("LoomA"));
        assert_eq!(criteria.loom_slot, Some(2));

        params.insert("loom_slot".to_string(), "two".to_string());
        assert!(catalog_criteria(&params).is_err());
    }

    #[test]
    fn test_catalog_view_serializes_for_responses() {
        let json = serde_json::to_value(CatalogView::default()).unwrap();
        assert!(json.get("weavers").is_some());
        assert!(json.get("looms").is_some());
        assert!(json.get("designs").is_some());
    }

    #[test]
    fn test_loom_payload_flattens_fields() {
        let payload: LoomPayload = serde_json::from_str(
            r#"{
                "loom_name": "LoomA",
                "loom_count": 3,
                "loom_type": "other",
                "jacquard_type": "manual",
                "hooks": 120,
                "description": "",
                "new_loom_type": "fly shuttle"
            }"#,
        )
        .unwrap();
        let submission: LoomSubmission = payload.into();
        assert_eq!(submission.fields.loom_count, 3);
        assert_eq!(submission.new_loom_type.as_deref(), Some("fly shuttle"));
    }
}
