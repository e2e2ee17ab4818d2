//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dashboard::{ChartDescriptor, ChartMetric};

// ============================================
// CHART DTOs
// ============================================

/// Chart query parameters. Omitted values fall back to the page defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ChartParams {
    #[serde(default)]
    pub region: Option<String>,
    /// ISO date (`YYYY-MM-DD`)
    #[serde(default)]
    pub start_date: Option<String>,
    /// ISO date (`YYYY-MM-DD`)
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Charts for one selection
#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub region: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Points per chart
    pub points: usize,
    /// Why the charts are empty, for selections that cannot match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// Confirmed, deaths, recovered
    pub charts: Vec<ChartDto>,
}

/// Single chart in a charts response
#[derive(Debug, Serialize)]
pub struct ChartDto {
    /// Element id of the chart card
    pub id: String,
    pub metric: ChartMetric,
    #[serde(flatten)]
    pub descriptor: ChartDescriptor,
    /// Plotly figure for the descriptor
    pub figure: Value,
}

// ============================================
// REGION DTOs
// ============================================

/// Region list response
#[derive(Debug, Serialize)]
pub struct RegionListResponse {
    pub regions: Vec<String>,
    pub total: usize,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` whenever the server is answering
    pub status: String,
    /// Records loaded
    pub records: usize,
    /// Distinct regions loaded
    pub regions: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
