//! Page layout model
//!
//! Everything the page needs to build its header and controls: titles, the
//! region dropdown options and the date picker bounds.

use chrono::NaiveDate;
use serde::Serialize;

use super::chart::ChartMetric;
use crate::config::DashboardConfig;
use crate::dataset::{Dataset, DatasetError, DatasetResult, Selection};

/// Date format used in the header description
const DESCRIPTION_DATE_FORMAT: &str = "%m.%d.%Y";

/// A chart card on the page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartSlot {
    pub id: String,
    pub metric: ChartMetric,
    pub title: String,
}

/// Dashboard page description
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DashboardLayout {
    /// Browser tab title
    pub title: String,
    pub heading: String,
    /// Sub-heading naming the covered period
    pub description: String,
    /// Dropdown options, sorted
    pub regions: Vec<String>,
    pub default_region: String,
    /// Earliest date the picker allows
    pub min_date: NaiveDate,
    /// Latest date the picker allows
    pub max_date: NaiveDate,
    /// Initial picker start
    pub start_date: NaiveDate,
    /// Initial picker end
    pub end_date: NaiveDate,
    pub charts: Vec<ChartSlot>,
}

impl DashboardLayout {
    /// Build the layout for a dataset. Fails only for an empty dataset.
    pub fn from_dataset(dataset: &Dataset, config: &DashboardConfig) -> DatasetResult<Self> {
        let (min_date, max_date) = dataset.date_bounds().ok_or(DatasetError::Empty)?;

        let default_region = if dataset.has_region(&config.default_region) {
            config.default_region.clone()
        } else {
            let fallback = dataset
                .regions()
                .first()
                .cloned()
                .ok_or(DatasetError::Empty)?;
            tracing::warn!(
                configured = %config.default_region,
                fallback = %fallback,
                "Default region not in dataset"
            );
            fallback
        };

        let charts = ChartMetric::all()
            .iter()
            .map(|m| ChartSlot {
                id: m.element_id().to_string(),
                metric: *m,
                title: m.title().to_string(),
            })
            .collect();

        Ok(Self {
            title: config.title.clone(),
            heading: config.heading.clone(),
            description: format!(
                "Statistics between {} and {}",
                min_date.format(DESCRIPTION_DATE_FORMAT),
                max_date.format(DESCRIPTION_DATE_FORMAT)
            ),
            regions: dataset.regions().to_vec(),
            default_region,
            min_date,
            max_date,
            start_date: min_date,
            end_date: max_date,
            charts,
        })
    }

    /// The selection the page opens with
    pub fn default_selection(&self) -> Selection {
        Selection::new(self.default_region.clone(), self.start_date, self.end_date)
    }
}
