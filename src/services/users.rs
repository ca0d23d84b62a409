// src/services/users.rs

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::ClientError;
use crate::objects::User;
use crate::rest::RestService;

use super::{parse_list, Outcome};

const BASE_ENDPOINT: &str = "/api/v1/users";
const TARGET: &str = "cognos_client::services::users";

/// User-related endpoints.
pub struct UsersService {
    rest: Arc<RestService>,
}

impl UsersService {
    pub(crate) fn new(rest: Arc<RestService>) -> Self {
        Self { rest }
    }

    /// List existing users matching the given identifier.
    pub async fn get_users(&self, identifier: &str) -> Result<Vec<User>, ClientError> {
        let response = self
            .rest
            .get(BASE_ENDPOINT, Some(&[("identifier", identifier)]))
            .await?;
        Ok(parse_list(&response.data, "users"))
    }

    /// Add a user to the namespace. A 409 means the user is already there.
    pub async fn add_user(
        &self,
        namespace: &str,
        identity: &str,
        default_name: &str,
    ) -> Result<Outcome, ClientError> {
        tracing::debug!(target: TARGET, namespace, identity, default_name, "adding user");
        let data = json!({ "defaultName": default_name, "identity": identity });
        let response = self
            .rest
            .post(BASE_ENDPOINT, Some(&[("namespace", namespace)]), Some(&data))
            .await?;
        let outcome = Outcome::from_response(&response);
        match &outcome {
            Outcome::Success => {
                tracing::info!(target: TARGET, identity, default_name, namespace, "added user");
            }
            Outcome::AlreadyExists => {
                tracing::info!(target: TARGET, identity, default_name, namespace, "user already exists in namespace");
            }
            _ => {
                tracing::error!(
                    target: TARGET,
                    identity, default_name, namespace, message = %response.message,
                    "could not add user"
                );
            }
        }
        Ok(outcome)
    }

    /// Delete a user by id.
    pub async fn delete_user(&self, user: &User) -> Result<Outcome, ClientError> {
        tracing::debug!(target: TARGET, user = %user.default_name, "deleting user");
        let response = self
            .rest
            .delete(&format!("{BASE_ENDPOINT}/{}", user.id), None)
            .await?;
        let outcome = Outcome::from_response(&response);
        if outcome == Outcome::NoContent {
            tracing::info!(target: TARGET, user = %user.default_name, "deleted user");
        } else {
            tracing::error!(
                target: TARGET,
                user = %user.default_name, message = %response.message,
                "could not delete user"
            );
        }
        Ok(outcome)
    }

    /// Copy the source user's profile (folders, pages, preferences) onto each
    /// of the target users. The gateway reports per-target failures in the
    /// `failed`/`failedList` fields of a 200 reply.
    pub async fn copy_user_profile(
        &self,
        source: &User,
        targets: &[User],
        copy_folders: bool,
        copy_pages: bool,
        copy_preferences: bool,
    ) -> Result<Outcome, ClientError> {
        tracing::debug!(
            target: TARGET,
            source = %source.default_name,
            target_count = targets.len(),
            "copying user profile"
        );
        let body = json!({
            "folders": copy_folders,
            "pages": copy_pages,
            "preferences": copy_preferences,
            "targetUsers": targets.iter().map(|user| user.id.clone()).collect::<Vec<_>>(),
        });
        let response = self
            .rest
            .post(
                &format!("{BASE_ENDPOINT}/{}/copy_profile", source.id),
                None,
                Some(&body),
            )
            .await?;

        if response.status_code.as_u16() == 500 {
            tracing::error!(target: TARGET, source = %source.default_name, "user profile copy failed");
            return Ok(Outcome::Failed {
                status: 500,
                message: response.message,
            });
        }
        let failed = response.data.get("failed").and_then(Value::as_i64).unwrap_or(0);
        if failed != 0 {
            tracing::error!(
                target: TARGET,
                source = %source.default_name,
                failed_list = ?response.data.get("failedList"),
                "user profile copy failed for some targets"
            );
            return Ok(Outcome::Failed {
                status: response.status_code.as_u16(),
                message: format!("{failed} target profiles failed"),
            });
        }
        tracing::info!(
            target: TARGET,
            source = %source.default_name,
            succeeded = ?response.data.get("succesList"),
            "copied user profile"
        );
        Ok(Outcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::RestService;
    use httptest::{
        matchers::{all_of, contains, request, url_decoded},
        responders::{json_encoded, status_code},
        Expectation, Server,
    };
    use reqwest::Url;

    fn service(server: &Server) -> UsersService {
        let base_url = Url::parse(&server.url_str("")).unwrap();
        UsersService::new(Arc::new(RestService::new(base_url).unwrap()))
    }

    #[tokio::test]
    async fn get_users_parses_the_users_key() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/api/v1/users"),
                request::query(url_decoded(contains(("identifier", "alice")))),
            ])
            .respond_with(json_encoded(json!({
                "users": [{
                    "id": "u1",
                    "type": "account",
                    "defaultName": "Alice",
                    "searchPath": "/u1",
                    "email": "alice@example.com",
                    "unknownField": true,
                }]
            }))),
        );

        let users = service(&server).get_users("alice").await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email.as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn add_user_conflict_is_benign() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/api/v1/users"))
                .respond_with(status_code(409)),
        );

        let outcome = service(&server)
            .add_user("LDAP", "uid=alice", "Alice")
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::AlreadyExists);
    }

    #[tokio::test]
    async fn delete_user_reports_no_content() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("DELETE", "/api/v1/users/u1"))
                .respond_with(status_code(204)),
        );

        let user = User {
            id: "u1".into(),
            object_type: "account".into(),
            default_name: "Alice".into(),
            search_path: "/u1".into(),
            modification_time: None,
            tenant_id: None,
            version: 0,
            links: None,
            email: None,
            user_name: None,
        };
        let outcome = service(&server).delete_user(&user).await.unwrap();
        assert_eq!(outcome, Outcome::NoContent);
    }

    #[tokio::test]
    async fn copy_user_profile_surfaces_partial_failures() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/api/v1/users/u1/copy_profile",
            ))
            .respond_with(json_encoded(json!({
                "failed": 1,
                "failedList": ["u3"],
                "succesList": ["u2"],
            }))),
        );

        let source = User {
            id: "u1".into(),
            object_type: "account".into(),
            default_name: "Alice".into(),
            search_path: "/u1".into(),
            modification_time: None,
            tenant_id: None,
            version: 0,
            links: None,
            email: None,
            user_name: None,
        };
        let outcome = service(&server)
            .copy_user_profile(&source, &[], true, true, true)
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Failed { .. }));
    }
}
