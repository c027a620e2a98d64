use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// The requested profile does not exist upstream.
    NotFound(String),
    /// The embedded state payload is missing or malformed.
    Parse(String),
    /// Transport-level failure while reaching the upstream page.
    Fetch(String),
    /// Invalid request input.
    BadRequest(String),
    /// The client exceeded its request budget for the current window.
    RateLimited,
    /// Internal server error.
    Internal(String),
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(username) => write!(f, "Profile '{}' does not exist", username),
            AppError::Parse(msg) => write!(f, "Failed to parse profile data: {}", msg),
            AppError::Fetch(msg) => write!(f, "Failed to fetch profile: {}", msg),
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::RateLimited => write!(f, "Rate limit exceeded. Please try again later."),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// HTTP status the error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound(_)
            | AppError::Parse(_)
            | AppError::Fetch(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Pipeline failures keep their message so callers can tell a missing
    /// profile apart from an upstream outage.
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Internal(msg) = &self {
            tracing::error!("Internal error: {}", msg);
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    /// Converts a `serde_json::Error` into an `AppError`.
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}
