use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::core::RateError;

const INTERNAL_DETAIL: &str = "Internal Server Error";

impl RateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RateError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RateError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RateError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Renders `{"detail": "..."}`. Internal errors are logged and hidden.
impl IntoResponse for RateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match &self {
            RateError::Internal(e) => {
                error!(error = ?e, "Request failed");
                INTERNAL_DETAIL.to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
