use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

// Rejections raised by the admission gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Invalid API key")]
    Unauthorized,
    #[error("Rate limit exceeded")]
    RateLimited,
}

impl GateError {
    pub fn status(&self) -> StatusCode {
        match self {
            GateError::Unauthorized => StatusCode::UNAUTHORIZED,
            GateError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

// Startup configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("port must be at least 1")]
    ZeroPort,
    #[error("rate limit must be at least 1 request per window")]
    ZeroRateLimit,
    #[error("rate window must be at least 1 ms")]
    ZeroRateWindow,
}

// JSON body sent back for a rejected request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub path: String,
    pub message: String,
}

// A gate error bound to the path it rejected
pub struct Rejection {
    pub error: GateError,
    pub path: String,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let body = ErrorBody {
            status_code: status.as_u16(),
            path: self.path,
            message: self.error.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
