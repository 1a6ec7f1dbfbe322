//! Per-request PostgreSQL connections.
//!
//! Every call opens a fresh `PgConnection`; nothing is pooled or reused.
//! Connections are private to the request that opened them and are released
//! on every exit path: closed explicitly after a successful query, dropped
//! otherwise.

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use thiserror::Error;

use crate::config::DbConfig;

/// Query used by `GET /` to identify the database server.
pub const VERSION_QUERY: &str = "SELECT version();";

#[derive(Debug, Error)]
pub enum DbError {
    /// Connection attempt failed (unreachable host, auth rejection, ...).
    #[error(transparent)]
    Connect(sqlx::Error),

    #[error("invalid port number: {0:?}")]
    InvalidPort(String),

    /// Query against an open connection failed.
    #[error(transparent)]
    Query(sqlx::Error),
}

impl DbError {
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::InvalidPort(_))
    }
}

/// Translate the configuration into driver options.
///
/// Only values that are present are applied; the rest keep whatever the
/// driver picks up on its own.
pub fn connect_options(config: &DbConfig) -> Result<PgConnectOptions, DbError> {
    let mut options = PgConnectOptions::new();

    if let Some(host) = &config.host {
        options = options.host(host);
    }
    if let Some(database) = &config.database {
        options = options.database(database);
    }
    if let Some(user) = &config.user {
        options = options.username(user);
    }
    if let Some(password) = &config.password {
        options = options.password(password);
    }
    if let Some(port) = &config.port {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| DbError::InvalidPort(port.clone()))?;
        options = options.port(port);
    }

    Ok(options)
}

/// Open a connection, reporting why it failed.
pub async fn try_connect(config: &DbConfig) -> Result<PgConnection, DbError> {
    let options = connect_options(config)?;
    PgConnection::connect_with(&options)
        .await
        .map_err(DbError::Connect)
}

/// Connection factory used by the request handlers.
///
/// Failures are logged and swallowed; callers only see `None`.
pub async fn connect(config: &DbConfig) -> Option<PgConnection> {
    match try_connect(config).await {
        Ok(conn) => Some(conn),
        Err(err) => {
            tracing::error!("Database connection error: {}", err);
            None
        }
    }
}

/// Run the version query on `conn` and close it.
///
/// Takes ownership so the connection cannot outlive the request. On a query
/// error the connection is dropped instead of closed.
pub async fn server_version(mut conn: PgConnection) -> Result<String, DbError> {
    let version = sqlx::query_scalar::<_, String>(VERSION_QUERY)
        .fetch_one(&mut conn)
        .await
        .map_err(DbError::Query)?;

    conn.close().await.map_err(DbError::Query)?;

    Ok(version)
}
