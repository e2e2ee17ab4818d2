//! Layout Routes
//!
//! What the page needs before its first chart request.
//!
//! - GET /api/v1/layout - Header text and control bounds
//! - GET /api/v1/regions - Region dropdown options

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::RegionListResponse;
use crate::api::state::AppState;
use crate::dashboard::DashboardLayout;

/// GET /api/v1/layout
pub async fn get_layout(State(state): State<Arc<AppState>>) -> Json<DashboardLayout> {
    Json(state.layout.as_ref().clone())
}

/// GET /api/v1/regions
pub async fn list_regions(State(state): State<Arc<AppState>>) -> Json<RegionListResponse> {
    let regions = state.dataset.regions().to_vec();

    Json(RegionListResponse {
        total: regions.len(),
        regions,
    })
}
