// src/services/mod.rs

// Declare modules
pub mod content;
pub mod groups;
pub mod namespaces;
pub mod report_data;
pub mod roles;
pub mod users;

// Re-export public API
pub use self::content::ContentService;
pub use self::groups::GroupsService;
pub use self::namespaces::NamespacesService;
pub use self::report_data::ReportDataService;
pub use self::roles::RolesService;
pub use self::users::UsersService;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::rest::RestResponse;

/// Result of a mutating service call.
///
/// Business statuses are reported here rather than raised; only transport
/// faults surface as [`ClientError`](crate::ClientError). Callers that only
/// care whether the remote state is now as requested can check
/// [`Outcome::is_success`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 200 or 201.
    Success,
    /// 204.
    NoContent,
    /// 409. Benign for create and add-member calls: the entity was already
    /// there.
    AlreadyExists,
    /// Any other status that reached the service layer.
    Failed { status: u16, message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success | Outcome::NoContent)
    }

    pub(crate) fn from_response(response: &RestResponse) -> Self {
        match response.status_code.as_u16() {
            200 | 201 => Outcome::Success,
            204 => Outcome::NoContent,
            409 => Outcome::AlreadyExists,
            status => Outcome::Failed {
                status,
                message: response.message.clone(),
            },
        }
    }
}

/// Kind of member addressed by the remove-member endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberType {
    User,
    Group,
}

impl MemberType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            MemberType::User => "user",
            MemberType::Group => "group",
        }
    }
}

/// Pull a named top-level array out of a payload and deserialize each entry.
///
/// A missing key yields an empty collection, never an error; entries that do
/// not match the record shape are skipped with a warning.
pub(crate) fn parse_list<T: DeserializeOwned>(data: &Value, key: &str) -> Vec<T> {
    let Some(items) = data.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(
                    target: "cognos_client::services",
                    key,
                    error = %err,
                    "skipping entry that does not match the record shape"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::User;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn outcome_maps_the_status_contract() {
        let ok = RestResponse::new(StatusCode::CREATED, "Created".into(), json!({}));
        assert_eq!(Outcome::from_response(&ok), Outcome::Success);

        let gone = RestResponse::new(StatusCode::NO_CONTENT, "No Content".into(), json!({}));
        assert_eq!(Outcome::from_response(&gone), Outcome::NoContent);

        let dup = RestResponse::new(StatusCode::CONFLICT, "Conflict".into(), json!({}));
        assert_eq!(Outcome::from_response(&dup), Outcome::AlreadyExists);
        assert!(!dup.is_success());

        let err = RestResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".into(),
            json!({}),
        );
        assert_eq!(
            Outcome::from_response(&err),
            Outcome::Failed {
                status: 500,
                message: "Internal Server Error".into()
            }
        );
    }

    #[test]
    fn parse_list_defaults_to_empty_on_missing_key() {
        let users: Vec<User> = parse_list(&json!({"groups": []}), "users");
        assert!(users.is_empty());
    }

    #[test]
    fn parse_list_skips_malformed_entries() {
        let payload = json!({
            "users": [
                {"id": "u1", "type": "account", "defaultName": "Alice", "searchPath": "/u1"},
                {"id": "u2"},
            ]
        });
        let users: Vec<User> = parse_list(&payload, "users");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "u1");
    }
}
