//! Gateway server setup
//!
//! Provides the WebSocket server configuration and routes.

mod handler;
mod state;

pub use handler::ws_handler;
pub use state::GatewayState;

use axum::{routing::get, Router};
use pulse_common::{AppConfig, AppError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize all dependencies and create `GatewayState`
pub async fn create_gateway_state(config: AppConfig) -> Result<GatewayState, AppError> {
    tracing::info!("Connecting to PostgreSQL...");
    let pool_config = pulse_store::PoolConfig::from(&config.database);
    let pool = pulse_store::create_pool(&pool_config)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    tracing::info!("PostgreSQL connection established");

    let messages = Arc::new(pulse_store::PgMessageStore::new(pool.clone()));
    let groups = Arc::new(pulse_store::PgGroupStore::new(pool.clone()));
    let calls = Arc::new(pulse_store::PgCallStore::new(pool.clone()));
    let users = Arc::new(pulse_store::PgUserStore::new(pool));

    Ok(GatewayState::new(messages, groups, calls, users, config))
}

/// Run the gateway server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    tracing::info!("Starting gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Gateway listening on ws://{}/ws", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.gateway.port));

    let state = create_gateway_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
