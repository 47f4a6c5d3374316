// Route layer: thin handlers that invoke a gateway, catch its classified
// failure, and terminate in exactly one envelope.

pub mod communications;
pub mod customers;
pub mod orders;
pub mod protected;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use crate::api::{ApiResponse, ApiResult};
use crate::error::GatewayError;
use crate::store::{AuthProvider, StoreClient};

/// Capabilities every handler works through, injected at construction.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StoreClient>,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(store: Arc<dyn StoreClient>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { store, auth }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // Orders and derived analytics
        .route("/api/orders", get(orders::list))
        .route("/api/orders/analytics/totals", get(orders::totals))
        .route("/api/orders/analytics/statistics", get(orders::statistics))
        .route("/api/orders/:id", get(orders::get))
        // Customers
        .route("/api/customers", get(customers::list))
        .route(
            "/api/customers/:id",
            get(customers::get).put(customers::update_company),
        )
        // Communications
        .route("/api/communications", get(communications::list))
        .route("/api/communications/:id", get(communications::get))
        // Protected per-user records
        .route("/api/me/records", get(protected::list_records))
        .route("/api/me/records/:id", get(protected::get_record))
        .with_state(state)
}

async fn root() -> ApiResponse<Value> {
    let version = env!("CARGO_PKG_VERSION");

    ApiResponse::success(json!({
        "name": "Backoffice API",
        "version": version,
        "endpoints": {
            "health": "/health (public)",
            "orders": "/api/orders[/:id]",
            "analytics": "/api/orders/analytics/{totals,statistics}",
            "customers": "/api/customers[/:id]",
            "communications": "/api/communications[/:id]",
            "me": "/api/me/records[/:id] (session required)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    let now = chrono::Utc::now();

    state.store.ping().await.map_err(GatewayError::from_store)?;

    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": now,
        "database": "ok",
    })))
}
