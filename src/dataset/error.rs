//! Dataset error types
//!
//! Errors raised while loading the CSV, plus the selection errors the
//! chart pipeline absorbs instead of surfacing.

use thiserror::Error;

/// Errors that can occur while loading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected the input
    #[error("CSV error: {0}")]
    Csv(String),

    /// A required column is absent from the header row
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    /// A data row could not be parsed
    #[error("Line {line}: {message}")]
    Row { line: u64, message: String },

    /// The input contained no usable records
    #[error("Dataset is empty")]
    Empty,
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        DatasetError::Csv(err.to_string())
    }
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Ways a selection can fall outside the dataset
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Region is not one of the dataset's regions
    #[error("Unknown region: {0}")]
    InvalidRegion(String),

    /// Start date lies after end date
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_error_display() {
        let err = DatasetError::MissingColumn("Recovered");
        assert_eq!(err.to_string(), "Missing column: Recovered");

        let err = DatasetError::Row {
            line: 4,
            message: "bad date".to_string(),
        };
        assert_eq!(err.to_string(), "Line 4: bad date");

        let err = SelectionError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2020-03-01 is after 2020-02-01"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DatasetError = io_err.into();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
