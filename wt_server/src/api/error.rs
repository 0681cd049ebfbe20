//! Mapping from service errors to HTTP responses.
//!
//! Every failure leaves the server as `{"error": "..."}` with a status derived
//! from the error's [`ErrorKind`]. Store failures are logged in full and
//! reach the client only as their sanitized message.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use workout_tracker::{
    ErrorKind, analytics::AnalyticsError, auth::AuthError, goals::GoalError,
    workouts::WorkoutError,
};

/// Error payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error ready to be returned from a handler
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Authentication required")
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Not allowed to act on this account")
    }

    fn from_kind(kind: ErrorKind, message: String, detail: &dyn std::fmt::Display) -> Self {
        if kind == ErrorKind::Store {
            tracing::error!(error = %detail, "Store failure");
        }
        Self::new(status_for(kind), message)
    }
}

/// HTTP status for an error category
///
/// Uniqueness conflicts answer 400, matching what registration clients expect.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
        ErrorKind::Auth => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::from_kind(err.kind(), err.client_message(), &err)
    }
}

impl From<WorkoutError> for ApiError {
    fn from(err: WorkoutError) -> Self {
        Self::from_kind(err.kind(), err.client_message(), &err)
    }
}

impl From<GoalError> for ApiError {
    fn from(err: GoalError) -> Self {
        Self::from_kind(err.kind(), err.client_message(), &err)
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        Self::from_kind(err.kind(), err.client_message(), &err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;
