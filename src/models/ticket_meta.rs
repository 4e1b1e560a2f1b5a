//! Ticket classification resources: statuses, types, priorities, sources.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};

use super::common::{BaseEntity, EntityRef};

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketStatus {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub name: String,
    pub code: Option<String>,
    pub color: Option<String>,
    pub display_order: Option<i32>,
}

#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketType {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub name: String,
    pub display_order: Option<i32>,
    pub enabled_for_future_inboxes: bool,
    /// Inboxes this type is offered in.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub inboxes: Vec<EntityRef>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketPriority {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub name: String,
    pub color: String,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketSource {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub name: String,
}
