//! Chart descriptors
//!
//! Renderer-agnostic line-chart descriptions, and their encoding as Plotly
//! figure JSON for the browser page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::dataset::Record;

/// Hover label shared by every chart: the count with thousands separators
const HOVER_TEMPLATE: &str = "%{y:,}<extra></extra>";

/// Horizontal title offset, as a fraction of the plot width
const TITLE_X: f64 = 0.05;

/// Which count column a chart plots
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChartMetric {
    Confirmed,
    Deaths,
    Recovered,
}

impl ChartMetric {
    /// All metrics in page order
    pub fn all() -> &'static [ChartMetric] {
        &[
            ChartMetric::Confirmed,
            ChartMetric::Deaths,
            ChartMetric::Recovered,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartMetric::Confirmed => "COVID-19 Confirmed",
            ChartMetric::Deaths => "COVID-19 Deaths",
            ChartMetric::Recovered => "COVID-19 Recovered",
        }
    }

    /// Line color
    pub fn color(&self) -> &'static str {
        match self {
            ChartMetric::Confirmed => "#000000",
            ChartMetric::Deaths => "#E12D39",
            ChartMetric::Recovered => "#17B897",
        }
    }

    /// Element id of the chart card on the page
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartMetric::Confirmed => "confirmed-chart",
            ChartMetric::Deaths => "deaths-chart",
            ChartMetric::Recovered => "recovered-chart",
        }
    }

    /// Extract this metric's count from a record
    pub fn value(&self, record: &Record) -> u64 {
        match self {
            ChartMetric::Confirmed => record.confirmed,
            ChartMetric::Deaths => record.deaths,
            ChartMetric::Recovered => record.recovered,
        }
    }
}

impl std::fmt::Display for ChartMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartMetric::Confirmed => write!(f, "confirmed"),
            ChartMetric::Deaths => write!(f, "deaths"),
            ChartMetric::Recovered => write!(f, "recovered"),
        }
    }
}

impl std::str::FromStr for ChartMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confirmed" => Ok(ChartMetric::Confirmed),
            "deaths" => Ok(ChartMetric::Deaths),
            "recovered" => Ok(ChartMetric::Recovered),
            _ => Err(format!("Unknown chart metric: {}", s)),
        }
    }
}

/// One line chart: data plus presentation
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartDescriptor {
    pub title: String,
    /// Dates along the x-axis
    pub x: Vec<NaiveDate>,
    /// Counts along the y-axis, same length as `x`
    pub y: Vec<u64>,
    pub color: String,
}

impl ChartDescriptor {
    /// Build a descriptor for one metric over a sequence of records
    pub fn from_records<'a>(
        metric: ChartMetric,
        records: impl IntoIterator<Item = &'a Record>,
    ) -> Self {
        let (x, y) = records
            .into_iter()
            .map(|r| (r.date, metric.value(r)))
            .unzip();

        Self {
            title: metric.title().to_string(),
            x,
            y,
            color: metric.color().to_string(),
        }
    }

    /// Descriptor with no points
    pub fn empty(metric: ChartMetric) -> Self {
        Self::from_records(metric, std::iter::empty::<&Record>())
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Encode as a Plotly figure
    pub fn to_figure(&self) -> Value {
        json!({
            "data": [{
                "x": self.x,
                "y": self.y,
                "type": "lines",
                "hovertemplate": HOVER_TEMPLATE,
            }],
            "layout": {
                "title": {
                    "text": self.title,
                    "x": TITLE_X,
                    "xanchor": "left",
                },
                "xaxis": { "fixedrange": true },
                "yaxis": { "fixedrange": true },
                "colorway": [self.color],
            },
        })
    }
}

/// The three charts produced for one selection
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartSet {
    pub confirmed: ChartDescriptor,
    pub deaths: ChartDescriptor,
    pub recovered: ChartDescriptor,
}

impl ChartSet {
    /// Charts with no points
    pub fn empty() -> Self {
        Self {
            confirmed: ChartDescriptor::empty(ChartMetric::Confirmed),
            deaths: ChartDescriptor::empty(ChartMetric::Deaths),
            recovered: ChartDescriptor::empty(ChartMetric::Recovered),
        }
    }

    pub fn get(&self, metric: ChartMetric) -> &ChartDescriptor {
        match metric {
            ChartMetric::Confirmed => &self.confirmed,
            ChartMetric::Deaths => &self.deaths,
            ChartMetric::Recovered => &self.recovered,
        }
    }

    /// Charts paired with their metric, in page order
    pub fn iter(&self) -> impl Iterator<Item = (ChartMetric, &ChartDescriptor)> {
        ChartMetric::all().iter().map(move |m| (*m, self.get(*m)))
    }

    /// Number of points per chart
    pub fn points(&self) -> usize {
        self.confirmed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new("Peru", NaiveDate::from_ymd_opt(2020, 5, 1).unwrap()).counts(5, 1, 2),
            Record::new("Peru", NaiveDate::from_ymd_opt(2020, 5, 2).unwrap()).counts(9, 3, 4),
        ]
    }

    #[test]
    fn test_descriptor_from_records() {
        let records = records();
        let chart = ChartDescriptor::from_records(ChartMetric::Deaths, &records);

        assert_eq!(chart.title, "COVID-19 Deaths");
        assert_eq!(chart.color, "#E12D39");
        assert_eq!(chart.y, vec![1, 3]);
        assert_eq!(chart.x.len(), chart.y.len());
    }

    #[test]
    fn test_figure_shape() {
        let records = records();
        let figure = ChartDescriptor::from_records(ChartMetric::Recovered, &records).to_figure();

        assert_eq!(figure["data"][0]["x"][0], "2020-05-01");
        assert_eq!(figure["data"][0]["y"][1], 4);
        assert_eq!(figure["data"][0]["type"], "lines");
        assert_eq!(figure["layout"]["title"]["text"], "COVID-19 Recovered");
        assert_eq!(figure["layout"]["title"]["xanchor"], "left");
        assert_eq!(figure["layout"]["xaxis"]["fixedrange"], true);
        assert_eq!(figure["layout"]["colorway"][0], "#17B897");
    }

    #[test]
    fn test_empty_figure_has_empty_series() {
        let figure = ChartDescriptor::empty(ChartMetric::Confirmed).to_figure();
        assert_eq!(figure["data"][0]["x"].as_array().map(Vec::len), Some(0));
        assert_eq!(figure["data"][0]["y"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!("Deaths".parse::<ChartMetric>(), Ok(ChartMetric::Deaths));
        assert!("active".parse::<ChartMetric>().is_err());
        assert_eq!(ChartMetric::Recovered.to_string(), "recovered");
    }

    #[test]
    fn test_chart_set_iter_order() {
        let ids: Vec<_> = ChartSet::empty()
            .iter()
            .map(|(m, _)| m.element_id())
            .collect();
        assert_eq!(ids, vec!["confirmed-chart", "deaths-chart", "recovered-chart"]);
    }
}
