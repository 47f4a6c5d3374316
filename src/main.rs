use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use backoffice_api::auth::AnonymousAuth;
use backoffice_api::config;
use backoffice_api::handlers::{router, AppState};
use backoffice_api::store::postgres::PgStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Backoffice API in {:?} mode", config.environment);

    let store = PgStore::connect()
        .await
        .unwrap_or_else(|e| panic!("failed to connect to store: {}", e.message));

    let state = AppState::new(Arc::new(store), Arc::new(AnonymousAuth));

    let mut app = router(state);
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    if config.api.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    // Allow tests or deployments to override port via env
    let port = std::env::var("BACKOFFICE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Backoffice API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
