//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::DashboardConfig;
use crate::dashboard::{ChartPipeline, DashboardLayout};
use crate::dataset::{Dataset, DatasetResult};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only dataset loaded at startup
    pub dataset: Arc<Dataset>,
    /// Chart pipeline over `dataset`
    pub pipeline: ChartPipeline,
    /// Page layout, fixed for the dataset's lifetime
    pub layout: Arc<DashboardLayout>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state for a loaded dataset. Fails if the dataset is empty.
    pub fn new(dataset: Arc<Dataset>, dashboard: &DashboardConfig) -> DatasetResult<Self> {
        let layout = DashboardLayout::from_dataset(&dataset, dashboard)?;

        Ok(Self {
            pipeline: ChartPipeline::new(Arc::clone(&dataset)),
            dataset,
            layout: Arc::new(layout),
            start_time: Instant::now(),
        })
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
