// src/rest/response.rs

use reqwest::StatusCode;
use serde_json::{json, Map, Value};

/// Normalized result of a single REST call.
///
/// Every response, whatever its shape, is reduced to a status code, the
/// canonical reason phrase and a JSON payload. `data` is always a value
/// (an empty object in the worst case) so callers never null-check it.
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse {
    pub status_code: StatusCode,
    pub message: String,
    pub data: Value,
}

impl RestResponse {
    pub(crate) fn new(status_code: StatusCode, message: String, data: Value) -> Self {
        Self {
            status_code,
            message,
            data,
        }
    }

    /// A response carrying no payload, used for the tolerated 409/500 cases
    /// and bodyless statuses.
    pub(crate) fn empty(status_code: StatusCode, message: String) -> Self {
        Self::new(status_code, message, Value::Object(Map::new()))
    }

    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }

    /// Reduce a response body to a JSON value.
    ///
    /// Empty bodies become an empty object; bodies that are not valid JSON
    /// are kept verbatim under a single `data` key rather than discarded.
    pub(crate) fn normalize_body(body: &str) -> Value {
        if body.is_empty() {
            return Value::Object(Map::new());
        }
        match serde_json::from_str(body) {
            Ok(value) => value,
            Err(_) => json!({ "data": body }),
        }
    }
}
