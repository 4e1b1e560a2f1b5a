//! Inboxes and agent access.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};

use super::common::BaseEntity;

/// A mailbox tickets arrive in.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Inbox {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub name: String,
    pub email: String,
    pub local_part: String,
    pub public: bool,
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub users: Vec<InboxUser>,
}

/// An agent's membership of an inbox.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxUser {
    pub id: u64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub meta: InboxMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxMeta {
    /// `read` or `write`.
    pub access: String,
}
