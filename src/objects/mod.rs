// src/objects/mod.rs
//
// Typed records mirroring the remote entity shapes. Deserialization is
// tolerant by construction: unknown remote fields are dropped, optional
// fields default, and loosely-typed attributes stay `serde_json::Value`.

pub mod content_object;
pub mod group;
pub mod members;
pub mod namespace_object;
pub mod policy;
pub mod role;
pub mod user;

pub use self::content_object::ContentObject;
pub use self::group::Group;
pub use self::members::Members;
pub use self::namespace_object::NamespaceObject;
pub use self::policy::{Permission, Policy, SecurityObject};
pub use self::role::Role;
pub use self::user::User;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_remote_fields_are_dropped() {
        let raw = json!({
            "id": "g1",
            "type": "group",
            "defaultName": "Admins",
            "searchPath": "/g1",
            "someFutureField": {"nested": true},
            "anotherOne": 42,
        });
        let group: Group = serde_json::from_value(raw).unwrap();
        assert_eq!(group.id, "g1");
        assert_eq!(group.default_name, "Admins");
        assert_eq!(group.search_path, "/g1");
    }

    #[test]
    fn optional_fields_take_defaults() {
        let raw = json!({
            "id": "u1",
            "type": "account",
            "defaultName": "Alice",
            "searchPath": "/u1",
        });
        let user: User = serde_json::from_value(raw).unwrap();
        assert_eq!(user.version, 0);
        assert!(user.email.is_none());
        assert!(user.user_name.is_none());
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let raw = json!({"id": "r1", "type": "role"});
        assert!(serde_json::from_value::<Role>(raw).is_err());
    }

    #[test]
    fn policy_round_trips_through_json() {
        let raw = json!({
            "permissions": [
                {"access": "grant", "name": "read"},
                {"access": "deny", "name": "write"},
            ],
            "securityObject": {"searchPath": "/g1", "type": "group"},
        });
        let policy: Policy = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(policy.permissions.len(), 2);
        assert_eq!(policy.security_object.search_path, "/g1");
        assert_eq!(serde_json::to_value(&policy).unwrap(), raw);
    }
}
