// src/rest/service.rs

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::{header, Client as ReqwestClient, Method, Response, StatusCode, Url};
use serde_json::Value;

use crate::error::ClientError;

use super::response::RestResponse;
use super::retry::RetryPolicy;

/// Non-success statuses returned to the caller as data instead of an error.
/// 409 means "already there" to most mutating endpoints and 500 is how the
/// gateway reports per-item failures on bulk operations; both are business
/// outcomes the service layer wants to see.
const TOLERATED_STATUSES: [StatusCode; 2] = [StatusCode::CONFLICT, StatusCode::INTERNAL_SERVER_ERROR];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Wrapper service for REST interactions against a Cognos Analytics gateway.
///
/// Owns one persistent connection context: a header map and a cookie jar that
/// login flows mutate and every later call reads, plus the retry policy. All
/// verb methods funnel through [`RestService::execute`], which normalizes
/// every outcome into a [`RestResponse`].
///
/// Header and cookie state is mutex-guarded so a single instance can be
/// shared across tasks via `Arc`.
pub struct RestService {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
    headers: Mutex<HashMap<String, String>>,
    cookies: Mutex<HashMap<String, String>>,
    retry: RetryPolicy,
}

impl RestService {
    /// Build a service with the default timeout (300s), TLS verification on
    /// and the default [`RetryPolicy`].
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        Self::with_options(base_url, true, DEFAULT_TIMEOUT, RetryPolicy::default())
    }

    /// Build a service with explicit transport settings. `ssl_verify` should
    /// stay on; turning it off is only for gateways with broken cert chains.
    pub fn with_options(
        base_url: Url,
        ssl_verify: bool,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, ClientError> {
        let client = ReqwestClient::builder()
            .danger_accept_invalid_certs(!ssl_verify)
            .build()
            .map_err(ClientError::Reqwest)?;
        Ok(Self {
            client,
            base_url,
            timeout,
            headers: Mutex::new(HashMap::new()),
            cookies: Mutex::new(HashMap::new()),
            retry,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // --- Header and cookie mutators ---

    pub fn get_http_header(&self, key: &str) -> Result<String, ClientError> {
        self.headers
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| ClientError::KeyNotFound(key.to_string()))
    }

    pub fn add_http_header(&self, key: &str, value: &str) {
        self.headers
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove_http_header(&self, key: &str) {
        self.headers.lock().unwrap().remove(key);
    }

    pub fn get_cookie(&self, key: &str) -> Result<String, ClientError> {
        self.cookies
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| ClientError::KeyNotFound(key.to_string()))
    }

    pub fn add_cookie(&self, key: &str, value: &str) {
        self.cookies
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove_cookie(&self, key: &str) {
        self.cookies.lock().unwrap().remove(key);
    }

    // --- Verb wrappers ---

    pub async fn get(
        &self,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<RestResponse, ClientError> {
        self.execute(Method::GET, endpoint, params, None).await
    }

    pub async fn post(
        &self,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
        data: Option<&Value>,
    ) -> Result<RestResponse, ClientError> {
        self.execute(Method::POST, endpoint, params, data).await
    }

    pub async fn put(
        &self,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
        data: Option<&Value>,
    ) -> Result<RestResponse, ClientError> {
        self.execute(Method::PUT, endpoint, params, data).await
    }

    pub async fn delete(
        &self,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<RestResponse, ClientError> {
        self.execute(Method::DELETE, endpoint, params, None).await
    }

    /// Execute one HTTP request, applying the retry policy, and return a
    /// normalized [`RestResponse`] regardless of outcome shape.
    ///
    /// Connection failures and responses in the retryable status set are
    /// retried transparently with exponential backoff. Once the budget is
    /// spent, a final 409 or 500 comes back as a `RestResponse` with empty
    /// data; any other non-2xx status fails with
    /// [`ClientError::RequestFailed`].
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
        data: Option<&Value>,
    ) -> Result<RestResponse, ClientError> {
        let url = self.build_url(endpoint)?;
        tracing::debug!(target: "cognos_client::rest", %method, %url, ?params, "dispatching request");

        let mut attempt: u32 = 0;
        loop {
            let response = match self.send(&method, &url, params, data).await {
                Ok(response) => response,
                Err(err) => {
                    if attempt < self.retry.max_retries {
                        let delay = self.retry.backoff(attempt);
                        tracing::warn!(
                            target: "cognos_client::rest",
                            %method, %url, error = %err, attempt,
                            delay_ms = delay.as_millis() as u64,
                            "connection failure, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    tracing::error!(target: "cognos_client::rest", %method, %url, error = %err, "connection failed");
                    return Err(ClientError::ConnectionFailed(err));
                }
            };

            self.capture_cookies(&response);
            let status = response.status();
            if self.retry.is_retryable(status) && attempt < self.retry.max_retries {
                let delay = self.retry.backoff(attempt);
                tracing::warn!(
                    target: "cognos_client::rest",
                    %method, %url, %status, attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retryable status, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return self.normalize(&method, &url, response).await;
        }
    }

    async fn send(
        &self,
        method: &Method,
        url: &Url,
        params: Option<&[(&str, &str)]>,
        data: Option<&Value>,
    ) -> Result<Response, reqwest::Error> {
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .timeout(self.timeout);
        {
            let headers = self.headers.lock().unwrap();
            for (key, value) in headers.iter() {
                request = request.header(key.as_str(), value.as_str());
            }
        }
        if let Some(cookie_header) = self.cookie_header() {
            request = request.header(header::COOKIE, cookie_header);
        }
        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(data) = data {
            request = request.json(data);
        }
        request.send().await
    }

    /// Reduce the final response of a call into a [`RestResponse`] or a
    /// transport error.
    async fn normalize(
        &self,
        method: &Method,
        url: &Url,
        response: Response,
    ) -> Result<RestResponse, ClientError> {
        let status = response.status();
        let message = status.canonical_reason().unwrap_or_default().to_string();

        if !status.is_success() {
            if TOLERATED_STATUSES.contains(&status) {
                tracing::warn!(target: "cognos_client::rest", %method, %url, %status, "tolerated non-success status");
                return Ok(RestResponse::empty(status, message));
            }
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::error!(target: "cognos_client::rest", %method, %url, %status, error_body = %body, "request failed");
            return Err(ClientError::RequestFailed {
                status,
                message: if body.is_empty() { message } else { body },
            });
        }

        let body = response.text().await.map_err(ClientError::Reqwest)?;
        let data = RestResponse::normalize_body(&body);
        tracing::debug!(target: "cognos_client::rest", %method, %url, %status, message = %message, "request completed");
        Ok(RestResponse::new(status, message, data))
    }

    /// Concatenate the endpoint onto the gateway URL. Plain concatenation, not
    /// `Url::join`, so a gateway mounted under a path prefix keeps it.
    fn build_url(&self, endpoint: &str) -> Result<Url, ClientError> {
        let full_url = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), endpoint);
        Url::parse(&full_url).map_err(ClientError::UrlParse)
    }

    /// Fold any `Set-Cookie` response headers into the jar.
    fn capture_cookies(&self, response: &Response) {
        let mut cookies = self.cookies.lock().unwrap();
        for value in response.headers().get_all(header::SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            let pair = raw.split(';').next().unwrap_or_default();
            if let Some((name, val)) = pair.split_once('=') {
                cookies.insert(name.trim().to_string(), val.trim().to_string());
            }
        }
    }

    fn cookie_header(&self) -> Option<String> {
        let cookies = self.cookies.lock().unwrap();
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
