//! Companies and their email domains.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};

use super::common::{BaseEntity, EntityRef};

#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub name: String,
    pub description: String,
    pub details: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub permission: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub domains: Vec<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub customers: Vec<EntityRef>,
}

/// Email domain mapping customers to a company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub name: String,
}
