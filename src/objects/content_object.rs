// src/objects/content_object.rs

use serde::{Deserialize, Serialize};

use super::policy::Policy;

/// A stored artifact (report, folder, ...) in the content repository tree.
///
/// Serializes back to the exact remote shape, so a fetched object can be
/// modified and PUT back through
/// [`ContentService::update_content`](crate::services::ContentService::update_content).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentObject {
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(rename = "defaultName")]
    pub default_name: String,
    #[serde(rename = "modificationTime", skip_serializing_if = "Option::is_none")]
    pub modification_time: Option<String>,
    #[serde(default)]
    pub policies: Vec<Policy>,
}
