//! Customers and their contact points.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};

use super::common::{BaseEntity, EntityRef};

/// A customer raising tickets.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub organization: Option<String>,
    pub job_title: Option<String>,
    pub notes: Option<String>,
    pub company: Option<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub contacts: Vec<EntityRef>,
    pub verified_email: bool,
}

/// One way of reaching a customer, e.g. an email address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    #[serde(flatten)]
    pub base: BaseEntity,
    /// Contact channel, e.g. `email` or `phone`.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub is_main: bool,
}
