//! Page Routes
//!
//! - GET / - The dashboard page
//! - anything else - JSON 404

use axum::{http::Uri, response::Html};

use crate::api::error::ApiError;

/// Dashboard page, compiled into the binary
const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
