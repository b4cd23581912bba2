use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use valuation_explorer::error::SelectionError;

/// API error type with HTTP response mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 404 - No such investor or record
    #[error("Not found: {0}")]
    NotFound(String),

    /// 400 - Invalid request data
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<SelectionError> for ApiError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::UnknownInvestor(_) | SelectionError::OutOfBounds { .. } => {
                ApiError::NotFound(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        };

        let body = Json(json!({
            "error": error_type,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
