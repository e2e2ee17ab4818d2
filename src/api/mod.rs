//! Dashboard HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard page
//!
//! ## Dashboard
//! - `GET /api/v1/layout` - Header text and control bounds
//! - `GET /api/v1/regions` - Region dropdown options
//! - `GET /api/v1/charts?region=&start_date=&end_date=` - Charts for a selection
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use covid_dash::api::{serve, AppState};
//! use covid_dash::config::Config;
//! use covid_dash::dataset::load_csv;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let dataset = Arc::new(load_csv(&config.data.csv_path)?);
//!
//!     let state = AppState::new(dataset, &config.dashboard)?;
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState, config: &ApiConfig) -> Router {
    let api_routes = Router::new()
        .route("/layout", get(routes::layout::get_layout))
        .route("/regions", get(routes::layout::list_regions))
        .route("/charts", get(routes::charts::get_charts));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .fallback(routes::page::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(cors_layer(&config.cors_origins))
        .with_state(shared_state)
}

/// Permissive CORS unless an allow-list is configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
}

/// Start the server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state, config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::dataset::CsvLoader;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    const CSV: &str = "Date,Region,Confirmed,Deaths,Recovered
2020-01-22,Afghanistan,1,0,0
2020-01-22,Albania,0,0,0
2020-01-23,Afghanistan,2,0,1
2020-01-23,Albania,3,1,0
2020-01-24,Afghanistan,5,1,2";

    fn create_test_app() -> Router {
        let (dataset, _) = CsvLoader::new().load_reader(CSV.as_bytes()).unwrap();
        let state = AppState::new(Arc::new(dataset), &DashboardConfig::default()).unwrap();
        build_router(state, &ApiConfig::default())
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = send_get(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (status, _) = send_get(create_test_app(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send_get(create_test_app(), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get_json(create_test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["records"], 5);
        assert_eq!(body["regions"], 2);
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_layout() {
        let (status, body) = get_json(create_test_app(), "/api/v1/layout").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["default_region"], "Afghanistan");
        assert_eq!(body["min_date"], "2020-01-22");
        assert_eq!(body["max_date"], "2020-01-24");
        assert_eq!(body["regions"][1], "Albania");
        assert_eq!(body["charts"][2]["id"], "recovered-chart");
    }

    #[tokio::test]
    async fn test_regions() {
        let (status, body) = get_json(create_test_app(), "/api/v1/regions").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["regions"][0], "Afghanistan");
    }

    #[tokio::test]
    async fn test_charts_default_selection() {
        let (status, body) = get_json(create_test_app(), "/api/v1/charts").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["region"], "Afghanistan");
        assert_eq!(body["points"], 3);
        assert!(body.get("notice").is_none());

        let charts = body["charts"].as_array().unwrap();
        assert_eq!(charts.len(), 3);
        assert_eq!(charts[0]["id"], "confirmed-chart");
        assert_eq!(charts[0]["y"], serde_json::json!([1, 2, 5]));
        assert_eq!(charts[1]["title"], "COVID-19 Deaths");
        assert_eq!(charts[2]["figure"]["data"][0]["y"], serde_json::json!([0, 1, 2]));
    }

    #[tokio::test]
    async fn test_charts_single_day() {
        let (status, body) = get_json(
            create_test_app(),
            "/api/v1/charts?region=Albania&start_date=2020-01-23&end_date=2020-01-23",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"], 1);
        assert_eq!(body["charts"][0]["x"], serde_json::json!(["2020-01-23"]));
        assert_eq!(body["charts"][1]["y"], serde_json::json!([1]));
    }

    #[tokio::test]
    async fn test_charts_unknown_region_is_empty() {
        let (status, body) = get_json(create_test_app(), "/api/v1/charts?region=Atlantis").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"], 0);
        assert_eq!(body["notice"], "Unknown region: Atlantis");
        for chart in body["charts"].as_array().unwrap() {
            assert_eq!(chart["x"], serde_json::json!([]));
            assert_eq!(chart["y"], serde_json::json!([]));
        }
    }

    #[tokio::test]
    async fn test_charts_inverted_range_is_empty() {
        let (status, body) = get_json(
            create_test_app(),
            "/api/v1/charts?start_date=2020-01-24&end_date=2020-01-22",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"], 0);
        assert!(body["notice"].as_str().unwrap().starts_with("Invalid date range"));
    }

    #[tokio::test]
    async fn test_charts_bad_date() {
        let (status, body) =
            get_json(create_test_app(), "/api/v1/charts?start_date=yesterday").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["request_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (status, body) = get_json(create_test_app(), "/api/v1/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let result = AppState::new(
            Arc::new(crate::dataset::Dataset::default()),
            &DashboardConfig::default(),
        );
        assert!(result.is_err());
    }
}
