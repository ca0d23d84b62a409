// src/client.rs

use std::sync::Arc;

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::error::ClientError;
use crate::rest::{RestResponse, RestService};
use crate::services::{
    ContentService, GroupsService, NamespacesService, Outcome, ReportDataService, RolesService,
    UsersService,
};

const SESSION_ENDPOINT: &str = "/api/v1/session";
const SESSION_HEADER: &str = "IBM-BA-Authorization";
const TARGET: &str = "cognos_client::client";

/// Entry point to the Cognos Analytics REST API: owns the shared transport
/// and exposes the domain services plus the session flows.
///
/// The session state machine has two states. A fresh client is
/// unauthenticated; any successful login installs the session token as the
/// persistent `IBM-BA-Authorization` header, after which every call through
/// any service carries it. Rejected logins leave the state untouched and are
/// reported as an [`Outcome`], not an error.
pub struct CognosClient {
    rest: Arc<RestService>,
    pub users: UsersService,
    pub groups: GroupsService,
    pub roles: RolesService,
    pub namespaces: NamespacesService,
    pub content: ContentService,
    pub report_data: ReportDataService,
}

impl CognosClient {
    /// Build a client with default transport settings.
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        Ok(Self::with_rest(RestService::new(base_url)?))
    }

    /// Build a client around a pre-configured transport (custom timeout,
    /// retry policy or TLS settings).
    pub fn with_rest(rest: RestService) -> Self {
        let rest = Arc::new(rest);
        Self {
            users: UsersService::new(rest.clone()),
            groups: GroupsService::new(rest.clone()),
            roles: RolesService::new(rest.clone()),
            namespaces: NamespacesService::new(rest.clone()),
            content: ContentService::new(rest.clone()),
            report_data: ReportDataService::new(rest.clone()),
            rest,
        }
    }

    /// The underlying transport, for header/cookie inspection and raw calls.
    pub fn rest(&self) -> &RestService {
        &self.rest
    }

    /// Log in with namespace credentials (username/password).
    pub async fn login(
        &self,
        namespace: &str,
        user: &str,
        password: &SecretString,
    ) -> Result<Outcome, ClientError> {
        let credentials = json!({
            "parameters": [
                { "name": "CAMNamespace", "value": namespace },
                { "name": "CAMUsername", "value": user },
                { "name": "CAMPassword", "value": password.expose_secret() },
            ]
        });
        let response = self.rest.put(SESSION_ENDPOINT, None, Some(&credentials)).await?;
        match response.status_code.as_u16() {
            200 | 201 => {
                self.install_session_key(&response)?;
                tracing::info!(target: TARGET, namespace, user, "logged in to Cognos Analytics");
                Ok(Outcome::Success)
            }
            status => {
                tracing::error!(
                    target: TARGET,
                    namespace, user, message = %response.message,
                    "could not log in to Cognos Analytics"
                );
                Ok(Outcome::Failed {
                    status,
                    message: response.message,
                })
            }
        }
    }

    /// Log in to an OIDC namespace with an authorization code.
    pub async fn login_with_code(
        &self,
        namespace: &str,
        code: &str,
    ) -> Result<Outcome, ClientError> {
        let credentials = json!({
            "parameters": [
                { "name": "CAMNamespace", "value": namespace },
                { "name": "code", "value": code },
            ]
        });
        let response = self.rest.put(SESSION_ENDPOINT, None, Some(&credentials)).await?;
        match response.status_code.as_u16() {
            201 => {
                self.install_session_key(&response)?;
                tracing::info!(target: TARGET, namespace, "logged in to Cognos Analytics");
                Ok(Outcome::Success)
            }
            status => {
                tracing::error!(
                    target: TARGET,
                    namespace, message = %response.message,
                    "could not log in to Cognos Analytics"
                );
                Ok(Outcome::Failed {
                    status,
                    message: response.message,
                })
            }
        }
    }

    /// Log in with an API key.
    pub async fn login_with_api_key(&self, api_key: &SecretString) -> Result<Outcome, ClientError> {
        let credentials = json!({
            "parameters": [
                { "name": "CAMAPILoginKey", "value": api_key.expose_secret() },
            ]
        });
        let response = self.rest.put(SESSION_ENDPOINT, None, Some(&credentials)).await?;
        match response.status_code.as_u16() {
            201 => {
                self.install_session_key(&response)?;
                tracing::info!(target: TARGET, "logged in to Cognos Analytics");
                Ok(Outcome::Success)
            }
            status => {
                tracing::error!(
                    target: TARGET,
                    message = %response.message,
                    "could not log in to Cognos Analytics"
                );
                Ok(Outcome::Failed {
                    status,
                    message: response.message,
                })
            }
        }
    }

    /// End the session. Success is 204.
    pub async fn logout(&self) -> Result<Outcome, ClientError> {
        let response = self.rest.delete(SESSION_ENDPOINT, None).await?;
        let outcome = Outcome::from_response(&response);
        if outcome == Outcome::NoContent {
            tracing::info!(target: TARGET, "logged out of Cognos Analytics");
        } else {
            tracing::error!(
                target: TARGET,
                message = %response.message,
                "could not log out of Cognos Analytics"
            );
        }
        Ok(outcome)
    }

    fn install_session_key(&self, response: &RestResponse) -> Result<(), ClientError> {
        let session_key = response
            .data
            .get("session_key")
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::KeyNotFound("session_key".to_string()))?;
        self.rest.add_http_header(SESSION_HEADER, session_key);
        Ok(())
    }
}
