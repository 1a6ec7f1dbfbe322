//! Service configuration, read once from the process environment at startup.
//!
//! Environment variables:
//!   DB_HOST             # PostgreSQL host
//!   POSTGRES_DB         # Database name
//!   POSTGRES_USER       # Role to connect as
//!   POSTGRES_PASSWORD   # Password for that role
//!   POSTGRES_PORT       # Port, parsed when a connection is attempted
//!   HOSTNAME            # Reported back by `GET /` (default: unknown)
//!
//! None of the database values are validated or defaulted here. Unset values
//! stay unset on the driver options, which then falls back to its own
//! defaults or fails the connect.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port the service listens on.
pub const DEFAULT_PORT: u16 = 5555;

/// All interfaces, port 5555.
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT);

/// Host name reported when `HOSTNAME` is not set.
pub const UNKNOWN_HOST: &str = "unknown";

pub const DB_HOST_VAR: &str = "DB_HOST";
pub const DB_NAME_VAR: &str = "POSTGRES_DB";
pub const DB_USER_VAR: &str = "POSTGRES_USER";
pub const DB_PASSWORD_VAR: &str = "POSTGRES_PASSWORD";
pub const DB_PORT_VAR: &str = "POSTGRES_PORT";
pub const HOSTNAME_VAR: &str = "HOSTNAME";

/// Connection parameters handed to the connection factory.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DbConfig {
    pub host: Option<String>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Raw value; a malformed port is a connect-time failure.
    pub port: Option<String>,
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("port", &self.port)
            .finish()
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbConfig,

    /// Value of `HOSTNAME`, or `"unknown"`
    pub hostname: String,

    /// Address to bind to (default: 0.0.0.0:5555)
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            db: DbConfig {
                host: lookup(DB_HOST_VAR),
                database: lookup(DB_NAME_VAR),
                user: lookup(DB_USER_VAR),
                password: lookup(DB_PASSWORD_VAR),
                port: lookup(DB_PORT_VAR),
            },
            hostname: lookup(HOSTNAME_VAR).unwrap_or_else(|| UNKNOWN_HOST.to_string()),
            bind_addr: DEFAULT_BIND_ADDR,
        }
    }
}

/// Read a variable, keeping non-UTF-8 values instead of treating them as unset.
fn env_lookup(key: &str) -> Option<String> {
    std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
}
