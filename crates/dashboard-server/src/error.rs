use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("API error: {0}")]
    Api(#[from] api_client::error::ApiError),
    #[error("Aggregation error: {0}")]
    Aggregation(#[from] aggregator::AggregatorError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}

/// Converts our custom `DashboardError` into an HTTP response.
impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            DashboardError::Api(api_err) => {
                tracing::error!(error = ?api_err, "FPL API error.");
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to fetch data from the FPL API".to_string(),
                )
            }
            DashboardError::Aggregation(agg_err) => {
                tracing::error!(error = ?agg_err, "Aggregation error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while aggregating league data".to_string(),
                )
            }
            DashboardError::Analytics(analytics_err) => {
                tracing::error!(error = ?analytics_err, "Analytics error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while computing statistics".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
