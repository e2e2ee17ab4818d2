//! covid-dash server
//!
//! Run with: cargo run --bin covid-dash-server [-- path/to/config.toml]
//!
//! # Configuration
//!
//! Read from the given TOML file, else `~/.config/covid-dash/config.toml` or
//! `./covid-dash.toml`. Environment variables override the file:
//! - `COVID_DASH_DATA`: CSV path (default: covid_19_filtered.csv)
//! - `COVID_DASH_HOST`: Host to bind to (default: 127.0.0.1)
//! - `COVID_DASH_PORT`: Port to listen on (default: 8050)
//! - `COVID_DASH_DEFAULT_REGION`: Region shown first (default: Afghanistan)
//! - `COVID_DASH_LOG_LEVEL` / `RUST_LOG`: Log level (default: info)

use anyhow::Context;
use covid_dash::api::{serve, AppState};
use covid_dash::config::Config;
use covid_dash::dataset::CsvLoader;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::resolve(config_path.as_deref())?;

    covid_dash::logging::init(&config.logging);

    tracing::info!("Starting covid-dash server v{}", env!("CARGO_PKG_VERSION"));

    let (dataset, report) = CsvLoader::from_config(&config.data)
        .load(&config.data.csv_path)
        .with_context(|| format!("failed to load {:?}", config.data.csv_path))?;

    if report.rows_skipped > 0 {
        tracing::warn!(
            "Skipped {} malformed rows ({} loaded)",
            report.rows_skipped,
            report.rows_loaded
        );
    }

    let state = AppState::new(Arc::new(dataset), &config.dashboard)?;
    tracing::info!(
        "Serving {} regions between {} and {}",
        state.layout.regions.len(),
        state.layout.min_date,
        state.layout.max_date
    );

    serve(state, &config.api).await?;

    tracing::info!("covid-dash server stopped");
    Ok(())
}
