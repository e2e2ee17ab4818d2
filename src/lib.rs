//! # covid-dash
//!
//! Interactive COVID-19 dashboard: loads a daily per-region case table and
//! serves a page with a region selector, a date-range picker and three line
//! charts (confirmed, deaths, recovered) that follow the selection.
//!
//! ## Modules
//!
//! - [`dataset`]: Immutable, date-sorted record table and its CSV loader
//! - [`dashboard`]: Filter-and-render pipeline, chart descriptors, page layout
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covid_dash::dashboard::render_charts;
//! use covid_dash::dataset::{load_csv, Selection};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = load_csv(Path::new("covid_19_filtered.csv"))?;
//!
//!     let selection = dataset
//!         .full_selection("Afghanistan")
//!         .ok_or("empty dataset")?;
//!     let charts = render_charts(&dataset, &selection);
//!
//!     println!("{} points for {}", charts.points(), selection);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod logging;

// Re-export top-level types for convenience
pub use dataset::{
    load_csv, CsvLoader, Dataset, DatasetError, DatasetResult, LoadReport, Record, Selection,
    SelectionError,
};

pub use dashboard::{
    render_charts, ChartDescriptor, ChartMetric, ChartPipeline, ChartSet, DashboardLayout,
    RenderOutcome,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DashboardConfig, DataConfig, LoggingConfig};
