//! Agents (helpdesk users).

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::common::BaseEntity;

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Option<String>,
    pub timezone: Option<String>,
    pub is_part_time: bool,
    pub only_see_inboxes: bool,
}
