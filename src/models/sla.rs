//! Service level agreements and their side-loaded parts.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};

use super::common::{BaseEntity, EntityRef};

/// An SLA policy. Targets, notifications and scoping conditions travel in
/// the envelope's `included` block.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sla {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub name: String,
    pub description: Option<String>,
    pub business_hour: Option<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub notifications: Vec<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub priorities: Vec<EntityRef>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlaNotificationCondition {
    #[default]
    Warning,
    Breach,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlaNotificationType {
    #[default]
    FirstResponse,
    NextResponse,
    Resolution,
}

/// How a scoping condition compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlaConditionOption {
    #[default]
    Equal,
    NotEqual,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlaNotification {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub condition: SlaNotificationCondition,
    #[serde(rename = "type")]
    pub kind: SlaNotificationType,
    /// Minutes before (warning) or after (breach) the target.
    pub duration: i64,
    pub notify_assigned_user: bool,
}

/// Response target for one ticket priority. No priority means the
/// target for tickets without one.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlaTicketPriority {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub hours: i64,
    pub minutes: i64,
    pub description: String,
    pub ticket_priority: Option<EntityRef>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaInbox {
    pub inbox: Option<EntityRef>,
    pub condition: SlaConditionOption,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaCompany {
    pub company: Option<EntityRef>,
    pub condition: SlaConditionOption,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaCustomer {
    pub customer: Option<EntityRef>,
    pub condition: SlaConditionOption,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaTag {
    pub tag: Option<EntityRef>,
    pub condition: SlaConditionOption,
}
