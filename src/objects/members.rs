// src/objects/members.rs

use serde::Deserialize;

use super::group::Group;
use super::user::User;

/// Membership of a group or role. Either collection may be absent in the
/// payload, in which case it deserializes empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Members {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub groups: Vec<Group>,
}
