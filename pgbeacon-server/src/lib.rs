//! pgbeacon-server: PostgreSQL version endpoint with metrics and health checks
//!
//! Routes:
//! - `GET /`        database version, greeting and host name
//! - `GET /metrics` Prometheus scrape target
//! - `GET /health`  liveness probe

pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod state;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use config::{Config, DbConfig};
pub use error::{ApiError, ServerError, ServerResult};
pub use metrics::Metrics;
pub use state::AppState;

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new().layer(TraceLayer::new_for_http());

    Router::new()
        .merge(routes::index::router())
        .merge(routes::metrics::router())
        .merge(routes::health::router())
        .layer(middleware)
        .with_state(state)
}

/// Serve requests on an already bound listener until the server stops.
pub async fn serve(listener: TcpListener, state: AppState) -> ServerResult<()> {
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

/// Start the HTTP server on `config.bind_addr`.
pub async fn run_server(config: Config) -> ServerResult<()> {
    let state = AppState::new(&config);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr,
            source,
        })?;

    tracing::info!(
        hostname = %config.hostname,
        db = ?config.db,
        "Starting pgbeacon on http://{}",
        config.bind_addr
    );

    serve(listener, state).await
}
