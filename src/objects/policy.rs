// src/objects/policy.rs

use serde::{Deserialize, Serialize};

/// Access-control entry attached to a content or security object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub permissions: Vec<Permission>,
    #[serde(rename = "securityObject")]
    pub security_object: SecurityObject,
}

/// One permission inside a [`Policy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub access: String,
    pub name: String,
}

/// The security object (user, group or role) a [`Policy`] applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityObject {
    #[serde(rename = "searchPath")]
    pub search_path: String,
    #[serde(rename = "type")]
    pub object_type: String,
}
