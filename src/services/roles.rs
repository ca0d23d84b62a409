// src/services/roles.rs

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::error::ClientError;
use crate::objects::{Group, Members, Role, User};
use crate::rest::RestService;

use super::{parse_list, MemberType, Outcome};

const BASE_ENDPOINT: &str = "/api/v1/roles";
const TARGET: &str = "cognos_client::services::roles";

/// Role-related endpoints. Mirrors [`GroupsService`](super::GroupsService)
/// against the `/api/v1/roles` prefix.
pub struct RolesService {
    rest: Arc<RestService>,
}

impl RolesService {
    pub(crate) fn new(rest: Arc<RestService>) -> Self {
        Self { rest }
    }

    /// Fetch a single role by id.
    pub async fn get_role(&self, role_id: &str) -> Result<Role, ClientError> {
        let response = self
            .rest
            .get(&format!("{BASE_ENDPOINT}/{role_id}"), None)
            .await?;
        Ok(serde_json::from_value(response.data)?)
    }

    /// List the roles under a namespace folder.
    pub async fn get_child_roles(&self, parent_id: &str) -> Result<Vec<Role>, ClientError> {
        let response = self
            .rest
            .get(BASE_ENDPOINT, Some(&[("parent_id", parent_id)]))
            .await?;
        Ok(parse_list(&response.data, "roles"))
    }

    /// Fetch the members (users and groups) of a role.
    pub async fn get_role_members(&self, role: &Role) -> Result<Members, ClientError> {
        let response = self
            .rest
            .get(&format!("{BASE_ENDPOINT}/{}/members", role.id), None)
            .await?;
        let members = serde_json::from_value(response.data).unwrap_or_else(|err| {
            tracing::warn!(target: TARGET, role = %role.default_name, error = %err, "unexpected members payload");
            Members::default()
        });
        Ok(members)
    }

    /// Create a role as a child of the given parent object.
    pub async fn create_role_as_child(
        &self,
        parent_id: &str,
        role_name: &str,
    ) -> Result<Outcome, ClientError> {
        let data = json!({ "defaultName": role_name, "type": "role" });
        let response = self
            .rest
            .post(&format!("{BASE_ENDPOINT}/{parent_id}"), None, Some(&data))
            .await?;
        let outcome = Outcome::from_response(&response);
        if outcome == Outcome::Success {
            tracing::info!(target: TARGET, role = role_name, "added role");
        } else {
            tracing::error!(
                target: TARGET,
                role = role_name, message = %response.message,
                "adding role failed"
            );
        }
        Ok(outcome)
    }

    /// Add users and/or groups as members of a role.
    pub async fn add_role_members(
        &self,
        role: &Role,
        groups_to_add: &[Group],
        users_to_add: &[User],
    ) -> Result<Outcome, ClientError> {
        tracing::debug!(
            target: TARGET,
            role = %role.default_name,
            group_count = groups_to_add.len(),
            user_count = users_to_add.len(),
            "adding role members"
        );
        let mut data = Map::new();
        if !users_to_add.is_empty() {
            data.insert(
                "users".to_string(),
                Value::Array(
                    users_to_add
                        .iter()
                        .map(|user| json!({"id": user.id}))
                        .collect(),
                ),
            );
        }
        if !groups_to_add.is_empty() {
            data.insert(
                "groups".to_string(),
                Value::Array(
                    groups_to_add
                        .iter()
                        .map(|member| json!({"id": member.id}))
                        .collect(),
                ),
            );
        }
        let data = Value::Object(data);
        let response = self
            .rest
            .post(&format!("{BASE_ENDPOINT}/{}/members", role.id), None, Some(&data))
            .await?;
        let outcome = Outcome::from_response(&response);
        if outcome == Outcome::Success {
            tracing::info!(
                target: TARGET,
                role = %role.default_name,
                member_count = groups_to_add.len() + users_to_add.len(),
                "added role members"
            );
        } else {
            tracing::error!(
                target: TARGET,
                role = %role.default_name, message = %response.message,
                "changing role members failed"
            );
        }
        Ok(outcome)
    }

    /// Remove one member from a role.
    pub async fn remove_role_member(
        &self,
        role: &Role,
        member_id: &str,
        member_type: MemberType,
    ) -> Result<Outcome, ClientError> {
        let response = self
            .rest
            .delete(
                &format!(
                    "{BASE_ENDPOINT}/{}/members/{}/{member_id}",
                    role.id,
                    member_type.as_str()
                ),
                None,
            )
            .await?;
        let outcome = Outcome::from_response(&response);
        if outcome.is_success() {
            tracing::info!(
                target: TARGET,
                role = %role.default_name, member_id,
                "removed member from role"
            );
        } else {
            tracing::error!(
                target: TARGET,
                role = %role.default_name, member_id, message = %response.message,
                "changing role members failed"
            );
        }
        Ok(outcome)
    }

    /// Delete a role.
    pub async fn delete_role(&self, role: &Role) -> Result<Outcome, ClientError> {
        tracing::debug!(target: TARGET, role = %role.default_name, "deleting role");
        let response = self
            .rest
            .delete(&format!("{BASE_ENDPOINT}/{}", role.id), None)
            .await?;
        let outcome = Outcome::from_response(&response);
        if outcome == Outcome::NoContent {
            tracing::info!(target: TARGET, role = %role.default_name, "deleted role");
        } else {
            tracing::error!(
                target: TARGET,
                role = %role.default_name, message = %response.message,
                "could not delete role"
            );
        }
        Ok(outcome)
    }
}
