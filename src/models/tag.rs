//! Ticket tags.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::common::BaseEntity;

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub name: String,
    pub color: Option<String>,
}
