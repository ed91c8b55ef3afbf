use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::application::AppError;

/// Map a service error to its HTTP response. Not-found resolves to 404;
/// every other rejection is a client error with a stable machine code.
pub fn app_error_to_response(err: AppError) -> axum::response::Response {
    let (status, code) = match &err {
        AppError::CustomerNotFound(_) => (StatusCode::NOT_FOUND, "customer_not_found"),
        AppError::CustomerAlreadyExists(_) => (StatusCode::BAD_REQUEST, "customer_already_exists"),
        AppError::InsufficientFunds { .. } => (StatusCode::BAD_REQUEST, "insufficient_funds"),
        AppError::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "invalid_amount"),
        AppError::InvalidDate(_) => (StatusCode::BAD_REQUEST, "invalid_date"),
    };
    json_error(status, code, err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
