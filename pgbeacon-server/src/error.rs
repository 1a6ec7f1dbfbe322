//! Error types for pgbeacon-server

use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DbError;

/// Message returned when no database connection could be opened.
pub const CONNECTION_FAILED: &str = "Database connection failed";

pub type ServerResult<T> = Result<T, ServerError>;

/// Fatal startup and serving errors.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-level failures, rendered as `{"error": ...}` with status 500.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The connection factory returned nothing.
    #[error("{}", CONNECTION_FAILED)]
    ConnectionFailed,

    /// The version query failed on an open connection.
    #[error(transparent)]
    Query(DbError),
}

/// Connect failures are already logged by `db::connect`.
impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        if e.is_connect() {
            Self::ConnectionFailed
        } else {
            Self::Query(e)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Query(e) = &self {
            tracing::error!("Database query error: {}", e);
        }

        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn connection_failure_is_500_with_fixed_message() {
        let response = ApiError::ConnectionFailed.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Database connection failed" })
        );
    }

    #[tokio::test]
    async fn query_failure_carries_driver_message() {
        let err = ApiError::Query(DbError::Query(sqlx::Error::RowNotFound));
        let expected = sqlx::Error::RowNotFound.to_string();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": expected }));
    }

    #[test]
    fn connect_errors_collapse_to_generic_failure() {
        let err: ApiError = DbError::InvalidPort("x".into()).into();
        assert!(matches!(err, ApiError::ConnectionFailed));

        let err: ApiError = DbError::Connect(sqlx::Error::PoolClosed).into();
        assert!(matches!(err, ApiError::ConnectionFailed));

        let err: ApiError = DbError::Query(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, ApiError::Query(_)));
    }

    #[tokio::test]
    async fn converted_connect_error_renders_generic_body() {
        let err: ApiError = DbError::InvalidPort("five".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Database connection failed" })
        );
    }
}
