//! Core data types for the dashboard dataset
//!
//! - `Record`: one region's counts on one day
//! - `Selection`: the region and date window the user is looking at

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily case counts for a single region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    /// Country or region name, matched exactly
    pub region: String,
    /// Calendar day the counts refer to
    pub date: NaiveDate,
    /// Cumulative confirmed cases
    pub confirmed: u64,
    /// Cumulative deaths
    pub deaths: u64,
    /// Cumulative recoveries
    pub recovered: u64,
}

impl Record {
    /// Create a record with all counts at zero
    pub fn new(region: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            region: region.into(),
            date,
            confirmed: 0,
            deaths: 0,
            recovered: 0,
        }
    }

    /// Builder method: set the three counts
    pub fn counts(mut self, confirmed: u64, deaths: u64, recovered: u64) -> Self {
        self.confirmed = confirmed;
        self.deaths = deaths;
        self.recovered = recovered;
        self
    }
}

/// The filter currently applied to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Selection {
    pub region: String,
    /// First day included
    pub start_date: NaiveDate,
    /// Last day included
    pub end_date: NaiveDate,
}

impl Selection {
    pub fn new(region: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            region: region.into(),
            start_date,
            end_date,
        }
    }

    /// Single-day selection
    pub fn on(region: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(region, date, date)
    }

    /// Whether the date window is non-empty
    pub fn has_valid_range(&self) -> bool {
        self.start_date <= self.end_date
    }

    /// Inclusive check against the date window
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether a record falls inside this selection
    pub fn matches(&self, record: &Record) -> bool {
        record.region == self.region && self.contains_date(record.date)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{} .. {}]", self.region, self.start_date, self.end_date)
    }
}
