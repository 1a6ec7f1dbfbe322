//! Route handlers organized by endpoint

pub mod health;
pub mod index;
pub mod metrics;
