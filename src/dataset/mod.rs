//! Dataset
//!
//! The immutable, date-ordered table of daily records the dashboard is built
//! on. It is loaded once at startup and then shared read-only (usually behind
//! an `Arc`) by every request.
//!
//! ## Components
//!
//! - **Record / Selection**: Core types (`types.rs`)
//! - **CsvLoader**: CSV parsing with header-based column lookup (`loader.rs`)
//! - **Errors**: Load and selection errors (`error.rs`)

pub mod error;
pub mod loader;
pub mod types;

pub use error::{DatasetError, DatasetResult, SelectionError};
pub use loader::{load_csv, CsvLoader, LoadReport, DEFAULT_DATE_FORMAT};
pub use types::{Record, Selection};

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Date-sorted collection of daily records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    /// Distinct regions, sorted
    regions: Vec<String>,
}

impl Dataset {
    /// Build a dataset, sorting records by date.
    ///
    /// The sort is stable, so records sharing a date keep their input order.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.date);

        let regions = records
            .iter()
            .map(|r| r.region.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        Self { records, regions }
    }

    /// All records in ascending date order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct region names in ascending order
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.regions
            .binary_search_by(|r| r.as_str().cmp(region))
            .is_ok()
    }

    /// Earliest and latest dates present, `None` when empty
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.date, last.date))
    }

    /// Records whose date lies in `[start, end]`, in dataset order.
    ///
    /// Both bounds are located by binary search since records are date-sorted.
    pub fn date_window(&self, start: NaiveDate, end: NaiveDate) -> &[Record] {
        if start > end {
            return &[];
        }
        let lo = self.records.partition_point(|r| r.date < start);
        let hi = self.records.partition_point(|r| r.date <= end);
        &self.records[lo..hi]
    }

    /// Records matching a selection, in dataset order
    pub fn select<'a>(&'a self, selection: &'a Selection) -> impl Iterator<Item = &'a Record> + 'a {
        self.date_window(selection.start_date, selection.end_date)
            .iter()
            .filter(move |r| selection.matches(r))
    }

    /// The selection covering a region's full date span
    pub fn full_selection(&self, region: impl Into<String>) -> Option<Selection> {
        let (start, end) = self.date_bounds()?;
        Some(Selection::new(region, start, end))
    }
}

impl Selection {
    /// Check this selection against a dataset.
    ///
    /// An invalid selection is still safe to render; it just matches nothing.
    pub fn validate(&self, dataset: &Dataset) -> Result<(), SelectionError> {
        if !dataset.has_region(&self.region) {
            return Err(SelectionError::InvalidRegion(self.region.clone()));
        }
        if !self.has_valid_range() {
            return Err(SelectionError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}
