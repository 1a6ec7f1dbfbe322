//! Root endpoint: report the database server version.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::{self, DbError};
use crate::error::ApiError;
use crate::state::AppState;

/// Greeting returned by `GET /`. Existing clients match on this exact text.
pub const GREETING: &str = "Hello from Python app!";

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub db_version: String,
    pub host: String,
}

/// GET /
///
/// Counts the request before touching the database, then opens a fresh
/// connection, asks for `version()` and closes it again.
#[tracing::instrument(skip_all, name = "pgbeacon.index")]
async fn index(State(state): State<AppState>) -> Result<Json<IndexResponse>, ApiError> {
    state.metrics().record_request();

    let Some(conn) = db::connect(state.db_config()).await else {
        return Err(ApiError::ConnectionFailed);
    };

    respond(&state, db::server_version(conn).await)
}

/// Shape the outcome of the version query into the `GET /` response.
fn respond(
    state: &AppState,
    version: Result<String, DbError>,
) -> Result<Json<IndexResponse>, ApiError> {
    let db_version = version?;
    tracing::debug!(%db_version, "database version fetched");

    Ok(Json(IndexResponse {
        message: GREETING,
        db_version,
        host: state.hostname().to_string(),
    }))
}

/// Root routes
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde_json::{json, Value};

    fn state_with_host(host: Option<&'static str>) -> AppState {
        let config = Config::from_lookup(move |key| match key {
            "HOSTNAME" => host.map(str::to_string),
            _ => None,
        });
        AppState::new(&config)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn serializes_exact_fields() {
        let body = serde_json::to_value(IndexResponse {
            message: GREETING,
            db_version: "PostgreSQL 15.2".into(),
            host: "web-1".into(),
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "message": "Hello from Python app!",
                "db_version": "PostgreSQL 15.2",
                "host": "web-1"
            })
        );
    }

    #[tokio::test]
    async fn version_becomes_200_body() {
        let state = state_with_host(Some("web-1"));

        let response = respond(&state, Ok("PostgreSQL 15.2".into())).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "message": "Hello from Python app!",
                "db_version": "PostgreSQL 15.2",
                "host": "web-1"
            })
        );
    }

    #[tokio::test]
    async fn host_falls_back_to_unknown() {
        let state = state_with_host(None);

        let response = respond(&state, Ok("PostgreSQL 16.1".into())).into_response();
        assert_eq!(body_json(response).await["host"], "unknown");
    }

    #[tokio::test]
    async fn query_error_becomes_500_with_driver_text() {
        let state = state_with_host(Some("web-1"));
        let expected = sqlx::Error::RowNotFound.to_string();

        let response =
            respond(&state, Err(DbError::Query(sqlx::Error::RowNotFound))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": expected }));
    }
}
