//! Application state shared across handlers

use std::sync::Arc;

use crate::config::{Config, DbConfig};
use crate::metrics::Metrics;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    db: DbConfig,
    hostname: String,
    metrics: Metrics,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_metrics(config, Metrics::new())
    }

    pub fn with_metrics(config: &Config, metrics: Metrics) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db: config.db.clone(),
                hostname: config.hostname.clone(),
                metrics,
            }),
        }
    }

    pub fn db_config(&self) -> &DbConfig {
        &self.inner.db
    }

    pub fn hostname(&self) -> &str {
        &self.inner.hostname
    }

    pub fn metrics(&self) -> &Metrics {
        &self.inner.metrics
    }
}
