// src/objects/namespace_object.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An entry returned by the (undocumented) namespace-administration
/// endpoints: a namespace itself or any item beneath one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceObject {
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(rename = "defaultName")]
    pub default_name: String,
    #[serde(rename = "searchPath")]
    pub search_path: String,
    #[serde(rename = "objectClass")]
    pub object_class: String,
    #[serde(rename = "creationTime", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(rename = "modificationTime", skip_serializing_if = "Option::is_none")]
    pub modification_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Value>,
    #[serde(rename = "hasChildren", skip_serializing_if = "Option::is_none")]
    pub has_children: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shown: Option<bool>,
    #[serde(rename = "tenantID", skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(
        rename = "defaultDescription",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_description: Option<String>,
    #[serde(default)]
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Value>,
    #[serde(rename = "defaultScreenTip", skip_serializing_if = "Option::is_none")]
    pub default_screen_tip: Option<String>,
}
