//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{BookingError, OrderError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request from the client.
    BadRequest(String),
    /// Order failed field validation.
    Validation(OrderError),
    /// Booking failed.
    Booking(BookingError),
    /// The blocking task running a booking call did not finish.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": format!("Cannot create order: {err}") }),
            ),
            ApiError::Booking(err) => booking_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": msg }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn booking_error_to_response(err: BookingError) -> (StatusCode, serde_json::Value) {
    match &err {
        BookingError::RoomUnavailable { dates, .. } => (
            StatusCode::CONFLICT,
            serde_json::json!({
                "error": "Hotel room is not available for selected dates",
                "unavailable_dates": dates,
            }),
        ),
        BookingError::Invalid(invalid) => (
            StatusCode::BAD_REQUEST,
            serde_json::json!({ "error": invalid.to_string() }),
        ),
        _ => {
            if err.is_integrity_failure() {
                tracing::error!(error = %err, integrity = true, "booking stores may be inconsistent");
            } else {
                tracing::error!(error = %err, "internal server error");
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": err.to_string() }),
            )
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        ApiError::Booking(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("booking task failed: {err}"))
    }
}
