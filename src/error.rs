// src/error.rs

use reqwest::StatusCode;

/// Error type for the Cognos client.
///
/// Only the first two variants are raised by the transport wrapper itself:
/// `RequestFailed` for a non-tolerated HTTP status after the retry budget is
/// spent, `ConnectionFailed` when the connection itself keeps failing. Service
/// methods never convert business statuses into errors.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Request failed: status={status}, message={message}")]
    RequestFailed { status: StatusCode, message: String },
    #[error("Connection failed: {0}")]
    ConnectionFailed(#[source] reqwest::Error),
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No header or cookie stored under key: {0}")]
    KeyNotFound(String),
}
