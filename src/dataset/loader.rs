//! CSV Loader
//!
//! Reads the daily COVID-19 table into a [`Dataset`]. Columns are located by
//! header name so extra columns and any column order are accepted.

use super::{Dataset, DatasetError, DatasetResult, Record};
use crate::config::DataConfig;
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;

/// Default date format of the `Date` column
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Header aliases accepted for the region column
const REGION_HEADERS: [&str; 2] = ["region", "country/region"];

/// Errors kept in a report before the tail is summarised
const MAX_REPORTED_ERRORS: usize = 100;

/// CSV loader with configurable parsing policy
#[derive(Debug, Clone)]
pub struct CsvLoader {
    /// Format string for the `Date` column
    date_format: String,
    /// Skip malformed rows instead of failing the load
    skip_invalid_rows: bool,
}

/// Outcome of a successful load
#[derive(Debug, Default)]
pub struct LoadReport {
    pub rows_loaded: usize,
    pub rows_skipped: usize,
    pub errors: Vec<String>,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    date: usize,
    region: usize,
    confirmed: usize,
    deaths: usize,
    recovered: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> DatasetResult<Self> {
        let find = |names: &[&str], column: &'static str| {
            headers
                .iter()
                .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
                .ok_or(DatasetError::MissingColumn(column))
        };

        Ok(Self {
            date: find(&["date"][..], "Date")?,
            region: find(&REGION_HEADERS[..], "Region")?,
            confirmed: find(&["confirmed"][..], "Confirmed")?,
            deaths: find(&["deaths"][..], "Deaths")?,
            recovered: find(&["recovered"][..], "Recovered")?,
        })
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            skip_invalid_rows: false,
        }
    }

    /// Loader with the parsing policy of a `[data]` config section
    pub fn from_config(config: &DataConfig) -> Self {
        Self::new()
            .with_date_format(&config.date_format)
            .with_skip_invalid_rows(config.skip_invalid_rows)
    }

    /// Set the date format string
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Skip malformed rows rather than aborting
    pub fn with_skip_invalid_rows(mut self, skip: bool) -> Self {
        self.skip_invalid_rows = skip;
        self
    }

    /// Load a dataset from a CSV file
    pub fn load(&self, path: &Path) -> DatasetResult<(Dataset, LoadReport)> {
        tracing::info!("Loading dataset from {:?}", path);
        let file = std::fs::File::open(path)?;
        self.load_reader(file)
    }

    /// Load a dataset from any reader
    pub fn load_reader<R: Read>(&self, input: R) -> DatasetResult<(Dataset, LoadReport)> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let columns = ColumnMap::from_headers(reader.headers()?)?;

        let mut records = Vec::new();
        let mut report = LoadReport::default();
        let mut unreported = 0usize;

        for (idx, result) in reader.records().enumerate() {
            // Header occupies line 1
            let fallback_line = idx as u64 + 2;

            let parsed = result
                .map_err(|e| (fallback_line, e.to_string()))
                .and_then(|row| {
                    let line = row.position().map(|p| p.line()).unwrap_or(fallback_line);
                    self.parse_row(&row, &columns).map_err(|msg| (line, msg))
                });

            match parsed {
                Ok(record) => records.push(record),
                Err((line, message)) if self.skip_invalid_rows => {
                    tracing::warn!(line, %message, "Skipping malformed row");
                    report.rows_skipped += 1;
                    if report.errors.len() < MAX_REPORTED_ERRORS {
                        report.errors.push(format!("Line {}: {}", line, message));
                    } else {
                        unreported += 1;
                    }
                }
                Err((line, message)) => return Err(DatasetError::Row { line, message }),
            }
        }

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        if unreported > 0 {
            report.errors.push(format!("... and {} more errors", unreported));
        }

        report.rows_loaded = records.len();
        let dataset = Dataset::from_records(records);

        tracing::info!(
            rows = report.rows_loaded,
            skipped = report.rows_skipped,
            regions = dataset.regions().len(),
            "Dataset loaded"
        );

        Ok((dataset, report))
    }

    fn parse_row(&self, row: &csv::StringRecord, columns: &ColumnMap) -> Result<Record, String> {
        let region = field(row, columns.region, "Region")?;
        if region.is_empty() {
            return Err("empty region".to_string());
        }

        let date_str = field(row, columns.date, "Date")?;
        let date = NaiveDate::parse_from_str(date_str, &self.date_format)
            .map_err(|e| format!("invalid date {:?}: {}", date_str, e))?;

        Ok(Record {
            region: region.to_string(),
            date,
            confirmed: parse_count(field(row, columns.confirmed, "Confirmed")?)?,
            deaths: parse_count(field(row, columns.deaths, "Deaths")?)?,
            recovered: parse_count(field(row, columns.recovered, "Recovered")?)?,
        })
    }
}

fn field<'r>(row: &'r csv::StringRecord, idx: usize, name: &str) -> Result<&'r str, String> {
    row.get(idx)
        .ok_or_else(|| format!("missing {} field", name))
}

/// Parse a case count. Integral floats such as `12.0` are accepted and an
/// empty field counts as zero.
fn parse_count(raw: &str) -> Result<u64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }

    if let Ok(n) = raw.parse::<u64>() {
        return Ok(n);
    }

    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(v as u64)
        }
        _ => Err(format!("invalid count {:?}", raw)),
    }
}

/// Load a CSV file with default settings
pub fn load_csv(path: &Path) -> DatasetResult<Dataset> {
    CsvLoader::new().load(path).map(|(dataset, _)| dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_sorts_by_date() {
        let csv_data = "Date,Region,Confirmed,Deaths,Recovered
2020-01-24,Afghanistan,3,0,0
2020-01-22,Afghanistan,1,0,0
2020-01-23,Albania,2,1,0";

        let (dataset, report) = CsvLoader::new().load_reader(csv_data.as_bytes()).unwrap();

        assert_eq!(report.rows_loaded, 3);
        assert_eq!(report.rows_skipped, 0);
        let dates: Vec<_> = dataset.records().iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![date(2020, 1, 22), date(2020, 1, 23), date(2020, 1, 24)]
        );
    }

    #[test]
    fn test_country_region_header_and_extra_columns() {
        let csv_data = "Province,Country/Region,Lat,Date, confirmed ,DEATHS,Recovered,Active
,Brazil,-14.2,2020-03-01,2,0,0,2";

        let (dataset, _) = CsvLoader::new().load_reader(csv_data.as_bytes()).unwrap();

        assert_eq!(
            dataset.records()[0],
            Record::new("Brazil", date(2020, 3, 1)).counts(2, 0, 0)
        );
    }

    #[test]
    fn test_float_counts_and_empty_fields() {
        let csv_data = "Date,Region,Confirmed,Deaths,Recovered
2020-04-01,Chad,12.0,,3";

        let (dataset, _) = CsvLoader::new().load_reader(csv_data.as_bytes()).unwrap();

        let record = &dataset.records()[0];
        assert_eq!(record.confirmed, 12);
        assert_eq!(record.deaths, 0);
        assert_eq!(record.recovered, 3);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv_data = "Date,Region,Confirmed,Deaths
2020-04-01,Chad,1,0";

        let err = CsvLoader::new().load_reader(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn("Recovered")));
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let csv_data = "Date,Region,Confirmed,Deaths,Recovered
2020-04-01,Chad,1,0,0
2020-04-02,Chad,-5,0,0";

        let err = CsvLoader::new().load_reader(csv_data.as_bytes()).unwrap_err();
        match err {
            DatasetError::Row { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("invalid count"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_skip_invalid_rows() {
        let csv_data = "Date,Region,Confirmed,Deaths,Recovered
2020-04-01,Chad,1,0,0
04/02/2020,Chad,2,0,0
2020-04-03,,3,0,0
2020-04-04,Chad,4,0,0";

        let (dataset, report) = CsvLoader::new()
            .with_skip_invalid_rows(true)
            .load_reader(csv_data.as_bytes())
            .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(report.rows_loaded, 2);
        assert_eq!(report.rows_skipped, 2);
        assert!(report.errors[0].starts_with("Line 3:"));
    }

    #[test]
    fn test_skipped_error_list_is_capped() {
        let mut csv_data = String::from("Date,Region,Confirmed,Deaths,Recovered\n");
        csv_data.push_str("2020-04-01,Chad,1,0,0\n");
        for _ in 0..105 {
            csv_data.push_str("bad-date,Chad,1,0,0\n");
        }

        let (_, report) = CsvLoader::new()
            .with_skip_invalid_rows(true)
            .load_reader(csv_data.as_bytes())
            .unwrap();

        assert_eq!(report.rows_skipped, 105);
        assert_eq!(report.errors.len(), MAX_REPORTED_ERRORS + 1);
        assert!(report.errors[0].starts_with("Line 3:"));
        assert_eq!(report.errors[MAX_REPORTED_ERRORS], "... and 5 more errors");
    }

    #[test]
    fn test_custom_date_format() {
        let csv_data = "Date,Region,Confirmed,Deaths,Recovered
01/22/2020,Peru,0,0,0";

        let (dataset, _) = CsvLoader::new()
            .with_date_format("%m/%d/%Y")
            .load_reader(csv_data.as_bytes())
            .unwrap();

        assert_eq!(dataset.records()[0].date, date(2020, 1, 22));
    }

    #[test]
    fn test_loader_from_config() {
        let config = DataConfig {
            date_format: "%d.%m.%Y".to_string(),
            skip_invalid_rows: true,
            ..Default::default()
        };
        let csv_data = "Date,Region,Confirmed,Deaths,Recovered
22.01.2020,Peru,3,0,0
2020-01-23,Peru,4,0,0";

        let (dataset, report) = CsvLoader::from_config(&config)
            .load_reader(csv_data.as_bytes())
            .unwrap();

        assert_eq!(dataset.records()[0].date, date(2020, 1, 22));
        assert_eq!(report.rows_skipped, 1);
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let csv_data = "Date,Region,Confirmed,Deaths,Recovered\n";
        let err = CsvLoader::new().load_reader(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Region,Confirmed,Deaths,Recovered").unwrap();
        writeln!(file, "2020-01-22,Afghanistan,1,0,0").unwrap();

        let dataset = load_csv(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.regions(), ["Afghanistan".to_string()]);
    }

    #[test]
    fn test_missing_file() {
        let err = load_csv(Path::new("/nonexistent/covid.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("42"), Ok(42));
        assert_eq!(parse_count(" 7.0 "), Ok(7));
        assert_eq!(parse_count(""), Ok(0));
        assert!(parse_count("1.5").is_err());
        assert!(parse_count("NaN").is_err());
        assert!(parse_count("abc").is_err());
    }
}
