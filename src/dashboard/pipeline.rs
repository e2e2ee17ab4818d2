//! Filter-and-render pipeline
//!
//! Maps a [`Selection`] to the three dashboard charts. Pure and total: any
//! selection renders, and one that matches nothing (unknown region, inverted
//! dates) renders empty charts.

use std::sync::Arc;

use super::chart::{ChartDescriptor, ChartMetric, ChartSet};
use crate::dataset::{Dataset, Record, Selection, SelectionError};

/// Render the confirmed, deaths and recovered charts for a selection
pub fn render_charts(dataset: &Dataset, selection: &Selection) -> ChartSet {
    let subset: Vec<&Record> = dataset.select(selection).collect();

    ChartSet {
        confirmed: ChartDescriptor::from_records(ChartMetric::Confirmed, subset.iter().copied()),
        deaths: ChartDescriptor::from_records(ChartMetric::Deaths, subset.iter().copied()),
        recovered: ChartDescriptor::from_records(ChartMetric::Recovered, subset.iter().copied()),
    }
}

/// Charts plus the reason they are empty, if the selection was invalid
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub charts: ChartSet,
    pub issue: Option<SelectionError>,
}

/// Pipeline bound to a loaded dataset
#[derive(Debug, Clone)]
pub struct ChartPipeline {
    dataset: Arc<Dataset>,
}

impl ChartPipeline {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn render(&self, selection: &Selection) -> ChartSet {
        render_charts(&self.dataset, selection)
    }

    /// Render and report why a selection could not match anything
    pub fn evaluate(&self, selection: &Selection) -> RenderOutcome {
        match selection.validate(&self.dataset) {
            Ok(()) => {
                let charts = self.render(selection);
                tracing::debug!(%selection, points = charts.points(), "Rendered charts");
                RenderOutcome {
                    charts,
                    issue: None,
                }
            }
            Err(issue) => {
                tracing::debug!(%selection, %issue, "Selection matches nothing");
                RenderOutcome {
                    charts: ChartSet::empty(),
                    issue: Some(issue),
                }
            }
        }
    }
}
