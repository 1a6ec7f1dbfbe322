mod tracing_setup;

use anyhow::{Context, Result};
use pgbeacon_server::{run_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env never overrides variables that are already set
    let dotenv_path = dotenvy::dotenv().ok();

    tracing_setup::init()?;

    match dotenv_path {
        Some(path) => tracing::debug!("Loaded .env from {}", path.display()),
        None => tracing::debug!("Using environment variables only (no .env file found)"),
    }

    let config = Config::from_env();

    run_server(config).await.context("Server error")
}
