// src/objects/role.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A role in the Cognos security hierarchy. Same attribute surface as
/// [`Group`](super::Group), kept separate because the remote API does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(rename = "defaultName")]
    pub default_name: String,
    #[serde(rename = "searchPath")]
    pub search_path: String,
    #[serde(rename = "modificationTime", skip_serializing_if = "Option::is_none")]
    pub modification_time: Option<String>,
    #[serde(
        rename = "defaultDescription",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Value>,
    #[serde(rename = "tenantID", skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies: Option<Value>,
}
