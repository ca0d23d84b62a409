// src/services/groups.rs

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::error::ClientError;
use crate::objects::{Group, Members, User};
use crate::rest::RestService;

use super::{parse_list, MemberType, Outcome};

const BASE_ENDPOINT: &str = "/api/v1/groups";
const TARGET: &str = "cognos_client::services::groups";

/// Group-related endpoints.
pub struct GroupsService {
    rest: Arc<RestService>,
}

impl GroupsService {
    pub(crate) fn new(rest: Arc<RestService>) -> Self {
        Self { rest }
    }

    /// Fetch a single group by id.
    pub async fn get_group(&self, group_id: &str) -> Result<Group, ClientError> {
        let response = self
            .rest
            .get(&format!("{BASE_ENDPOINT}/{group_id}"), None)
            .await?;
        Ok(serde_json::from_value(response.data)?)
    }

    /// List the groups under a namespace folder.
    pub async fn get_child_groups(&self, parent_id: &str) -> Result<Vec<Group>, ClientError> {
        let response = self
            .rest
            .get(BASE_ENDPOINT, Some(&[("parent_id", parent_id)]))
            .await?;
        Ok(parse_list(&response.data, "groups"))
    }

    /// Fetch the members (users and groups) of a group. Absent member kinds
    /// come back as empty collections.
    pub async fn get_group_members(&self, group: &Group) -> Result<Members, ClientError> {
        let response = self
            .rest
            .get(&format!("{BASE_ENDPOINT}/{}/members", group.id), None)
            .await?;
        let members = serde_json::from_value(response.data).unwrap_or_else(|err| {
            tracing::warn!(target: TARGET, group = %group.default_name, error = %err, "unexpected members payload");
            Members::default()
        });
        Ok(members)
    }

    /// Create a group as a child of the given parent object.
    pub async fn create_group_as_child(
        &self,
        parent_id: &str,
        group_name: &str,
    ) -> Result<Outcome, ClientError> {
        let data = json!({ "defaultName": group_name, "type": "group" });
        let response = self
            .rest
            .post(&format!("{BASE_ENDPOINT}/{parent_id}"), None, Some(&data))
            .await?;
        let outcome = Outcome::from_response(&response);
        if outcome == Outcome::Success {
            tracing::info!(target: TARGET, group = group_name, "added group");
        } else {
            tracing::error!(
                target: TARGET,
                group = group_name, message = %response.message,
                "adding group failed"
            );
        }
        Ok(outcome)
    }

    /// Add users and/or groups as members of a group.
    pub async fn add_group_members(
        &self,
        group: &Group,
        groups_to_add: &[Group],
        users_to_add: &[User],
    ) -> Result<Outcome, ClientError> {
        tracing::debug!(
            target: TARGET,
            group = %group.default_name,
            group_count = groups_to_add.len(),
            user_count = users_to_add.len(),
            "adding group members"
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
            .post(&format!("{BASE_ENDPOINT}/{}/members", group.id), None, Some(&data))
            .await?;
        let outcome = Outcome::from_response(&response);
        if outcome == Outcome::Success {
            tracing::info!(
                target: TARGET,
                group = %group.default_name,
                group_count = groups_to_add.len(),
                user_count = users_to_add.len(),
                "added members to group"
            );
        } else {
            tracing::error!(
                target: TARGET,
                group = %group.default_name, message = %response.message,
                "changing group members failed"
            );
        }
        Ok(outcome)
    }

    /// Remove one member from a group.
    pub async fn remove_group_member(
        &self,
        group: &Group,
        member_id: &str,
        member_type: MemberType,
    ) -> Result<Outcome, ClientError> {
        let response = self
            .rest
            .delete(
                &format!(
                    "{BASE_ENDPOINT}/{}/members/{}/{member_id}",
                    group.id,
                    member_type.as_str()
                ),
                None,
            )
            .await?;
        let outcome = Outcome::from_response(&response);
        if outcome.is_success() {
            tracing::info!(
                target: TARGET,
                group = %group.default_name, member_id,
                "removed member from group"
            );
        } else {
            tracing::error!(
                target: TARGET,
                group = %group.default_name, member_id, message = %response.message,
                "changing group members failed"
            );
        }
        Ok(outcome)
    }

    /// Delete a group.
    pub async fn delete_group(&self, group: &Group) -> Result<Outcome, ClientError> {
        tracing::debug!(target: TARGET, group = %group.default_name, "deleting group");
        let response = self
            .rest
            .delete(&format!("{BASE_ENDPOINT}/{}", group.id), None)
            .await?;
        let outcome = Outcome::from_response(&response);
        if outcome == Outcome::NoContent {
            tracing::info!(target: TARGET, group = %group.default_name, "deleted group");
        } else {
            tracing::error!(
                target: TARGET,
                group = %group.default_name, message = %response.message,
                "could not delete group"
            );
        }
        Ok(outcome)
    }
}
