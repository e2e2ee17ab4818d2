//! Dashboard
//!
//! Turns the dataset and the user's selection into what the page draws.
//!
//! - [`render_charts`]: the filter-and-render pipeline
//! - [`ChartDescriptor`]: one line chart, renderable as a Plotly figure
//! - [`DashboardLayout`]: header text and control bounds for the page

pub mod chart;
pub mod layout;
pub mod pipeline;

pub use chart::{ChartDescriptor, ChartMetric, ChartSet};
pub use layout::{ChartSlot, DashboardLayout};
pub use pipeline::{render_charts, ChartPipeline, RenderOutcome};
