//! Business hour schedules.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::common::BaseEntity;

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessHour {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub name: String,
    pub is_default: bool,
    pub timezone: Option<String>,
}
