//! Tickets and ticket search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};

use super::common::{BaseEntity, EntityRef};

/// A support ticket.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticket {
    #[serde(flatten)]
    pub base: BaseEntity,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub activities: Vec<EntityRef>,
    pub agent: Option<EntityRef>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub bcc: Vec<String>,
    /// Body of the first message.
    #[serde(rename = "message")]
    pub body: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub cc: Vec<String>,
    pub contact: Option<EntityRef>,
    pub customer: EntityRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub files: Vec<EntityRef>,
    pub happiness_survey_sent_at: Option<DateTime<Utc>>,
    pub images_hidden: bool,
    pub inbox: EntityRef,
    pub is_read: bool,
    pub message_count: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub messages: Vec<EntityRef>,
    pub notify_customer: bool,
    pub original_recipient: String,
    pub preview_text: String,
    pub priority: Option<EntityRef>,
    pub readonly: bool,
    pub resolution_time_mins: i64,
    pub response_time_mins: i64,
    pub source: Option<EntityRef>,
    #[serde(rename = "spam_rules")]
    pub spam_rules: Option<Value>,
    /// Spam classifier score. Fractional on the wire.
    #[serde(rename = "spam_score")]
    pub spam_score: f64,
    pub status: Option<EntityRef>,
    pub subject: String,
    pub suggestions: Option<Value>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub tags: Vec<EntityRef>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub timelogs: Vec<EntityRef>,
    #[serde(rename = "type")]
    pub ticket_type: Option<EntityRef>,
}

/// Custom-field clause of a ticket search.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomFieldSearch {
    pub id: i64,
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<i64>,
    pub operation: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Criteria for the ticket search endpoint.
///
/// Unset fields are left out of the query string.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTicketsFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub customers: Vec<i64>,
    #[serde(rename = "customfields", skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldSearch>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_false")]
    pub exact: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_inboxes: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_tags: Vec<i64>,
    #[serde(skip_serializing_if = "is_false")]
    pub exclude_work_emails: bool,
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub helpdoc_sites: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inboxes: Vec<i64>,
    #[serde(skip_serializing_if = "is_false")]
    pub include_archived_agents: bool,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_false")]
    pub omit_merged: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub only_untagged: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub only_with_attachment: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub priorities: Vec<i64>,
    #[serde(rename = "project")]
    pub project_id: Option<i64>,
    #[serde(rename = "tagRequireAll", skip_serializing_if = "is_false")]
    pub require_all_tags: bool,
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<i64>,
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subject_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<i64>,
    #[serde(rename = "task")]
    pub task_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub task_statuses: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<i64>,
    #[serde(rename = "ticket")]
    pub ticket_id: Option<i64>,
    pub time_range: Option<String>,
    #[serde(rename = "twCompanyIds", skip_serializing_if = "Vec::is_empty")]
    pub tw_company_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<i64>,
    #[serde(skip_serializing_if = "is_false")]
    pub unassigned: bool,
}
