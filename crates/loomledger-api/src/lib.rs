//! HTTP JSON API server
//!
//! Routes are organized into modules:
//! - routes::transactions: Ledger view, submissions, export, categories
//! - routes::locations: Partition listing and switching
//! - routes::catalog: Weaver, loom, and design records plus dropdown options

pub mod error;
pub mod routes;

use axum::http::HeaderMap;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use loomledger_backend::BackendRef;
use loomledger_catalog::Catalog;
use loomledger_config::Config;
use loomledger_core::{Ledger, LocationRegistry};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub catalog: Arc<Catalog>,
    pub locations: Arc<LocationRegistry>,
    pub backend: BackendRef,
    pub config: Config,
}

/// Check the admin credential headers against the backend
///
/// Record amendments stay behind this gate; submissions do not.
pub async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let username = headers
        .get("x-admin-user")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;
    let password = headers
        .get("x-admin-password")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    match state.backend.verify_admin_password(username, password).await? {
        true => Ok(()),
        false => Err(ApiError::Unauthorized),
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::catalog::{
        api_catalog, api_design_store, api_design_update, api_designs, api_enum_values,
        api_loom_names, api_loom_slot_options, api_loom_store, api_loom_update, api_looms,
        api_weaver_store, api_weaver_update, api_weavers,
    };
    use routes::locations::{api_location_activate, api_location_store, api_locations};
    use routes::transactions::{
        api_categories, api_transaction_store, api_transaction_update, api_transactions,
        api_transactions_export,
    };

    Router::new()
        .route("/api/health", get(health_check))
        // Ledger
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions", post(api_transaction_store))
        .route("/api/transactions/export", get(api_transactions_export))
        .route("/api/transactions/:id", put(api_transaction_update))
        .route("/api/categories", get(api_categories))
        // Locations
        .route("/api/locations", get(api_locations))
        .route("/api/locations", post(api_location_store))
        .route("/api/locations/active", put(api_location_activate))
        // Catalog
        .route("/api/catalog", get(api_catalog))
        .route("/api/weavers", get(api_weavers))
        .route("/api/weavers", post(api_weaver_store))
        .route("/api/weavers/:id", put(api_weaver_update))
        .route("/api/looms", get(api_looms))
        .route("/api/looms", post(api_loom_store))
        .route("/api/looms/:id", put(api_loom_update))
        .route("/api/designs", get(api_designs))
        .route("/api/designs", post(api_design_store))
        .route("/api/designs/:id", put(api_design_update))
        .route("/api/options/loom-names", get(api_loom_names))
        .route("/api/options/loom-slots", get(api_loom_slot_options))
        .route("/api/enums/:kind", get(api_enum_values))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server
///
/// This is the main entry point for the loomledger server. It creates the
/// router, binds to the configured address, and listens for requests.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    eprintln!("[INFO] Starting loomledger server on http://{}", addr);
    eprintln!("[INFO]   - /api/transactions (Ledger)");
    eprintln!("[INFO]   - /api/locations (Business locations)");
    eprintln!("[INFO]   - /api/weavers, /api/looms, /api/designs (Catalog)");

    axum::serve(listener, router).await?;
    eprintln!("[INFO] Server stopped gracefully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomledger_backend::MemoryBackend;

    fn test_state() -> AppState {
        let backend: BackendRef = Arc::new(
            MemoryBackend::with_locations(&["main".to_string()]).with_admin("owner", "secret"),
        );
        AppState {
            ledger: Arc::new(Ledger::new(backend.clone(), "main")),
            catalog: Catalog::new(backend.clone()),
            locations: Arc::new(LocationRegistry::new(backend.clone(), "main")),
            backend,
            config: Config::default(),
        }
    }

    #[tokio::test]
    async fn test_admin_gate() {
        let state = test_state();

        let mut headers = HeaderMap::new();
        assert!(require_admin(&state, &headers).await.is_err());

        headers.insert("x-admin-user", "owner".parse().unwrap());
        headers.insert("x-admin-password", "wrong".parse().unwrap());
        assert!(require_admin(&state, &headers).await.is_err());

        headers.insert("x-admin-password", "secret".parse().unwrap());
        assert!(require_admin(&state, &headers).await.is_ok());
    }

    #[test]
    fn test_router_builds() {
        let _router = create_router(test_state());
    }
}
