//! Chart Routes
//!
//! The endpoint the page calls whenever a control changes.
//!
//! - GET /api/v1/charts - Render the three charts for a selection

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

use crate::api::dto::{ChartDto, ChartParams, ChartsResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::DashboardLayout;
use crate::dataset::{Selection, DEFAULT_DATE_FORMAT};

/// GET /api/v1/charts
///
/// Unknown regions and inverted date ranges are not errors: they render
/// empty charts with a `notice`.
pub async fn get_charts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChartParams>,
) -> ApiResult<Json<ChartsResponse>> {
    let selection = resolve_selection(&params, &state.layout)?;
    let outcome = state.pipeline.evaluate(&selection);

    let charts = outcome
        .charts
        .iter()
        .map(|(metric, descriptor)| ChartDto {
            id: metric.element_id().to_string(),
            metric,
            figure: descriptor.to_figure(),
            descriptor: descriptor.clone(),
        })
        .collect();

    Ok(Json(ChartsResponse {
        points: outcome.charts.points(),
        notice: outcome.issue.map(|e| e.to_string()),
        region: selection.region,
        start_date: selection.start_date,
        end_date: selection.end_date,
        charts,
    }))
}

/// Fill omitted or blank parameters from the page defaults
fn resolve_selection(params: &ChartParams, layout: &DashboardLayout) -> ApiResult<Selection> {
    let present = |value: &Option<String>| value.clone().filter(|s| !s.trim().is_empty());
    let mut selection = layout.default_selection();

    if let Some(region) = present(&params.region) {
        selection.region = region;
    }
    if let Some(raw) = present(&params.start_date) {
        selection.start_date = parse_date("start_date", &raw)?;
    }
    if let Some(raw) = present(&params.end_date) {
        selection.end_date = parse_date("end_date", &raw)?;
    }

    Ok(selection)
}

/// Parse an ISO date, also accepting a midnight timestamp as date pickers send
fn parse_date(field: &str, raw: &str) -> ApiResult<NaiveDate> {
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, DEFAULT_DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| ApiError::Validation(format!("{} must be YYYY-MM-DD, got {:?}", field, raw)))
}
