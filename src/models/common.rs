//! Types shared by every resource.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};

use crate::error::{DeskError, Result};

use super::company::Domain;
use super::customer::Contact;
use super::sla::{SlaCompany, SlaCustomer, SlaInbox, SlaNotification, SlaTag, SlaTicketPriority};

/// Free-form metadata returned with collections.
pub type Meta = Map<String, Value>;

pub(crate) fn is_zero(id: &u64) -> bool {
    *id == 0
}

/// Fields carried by every entity. Server-assigned; left out of requests
/// while unset.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseEntity {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: Option<EntityRef>,
    pub updated_by: Option<EntityRef>,
    pub state: Option<String>,
}

/// Reference to another entity by ID.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityRef {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub meta: Option<Value>,
}

impl EntityRef {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

/// Side-loaded entities referenced by the primary one.
///
/// Collections the client builds itself are typed; everything else the
/// server sends is kept verbatim in `other`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncludedData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub contacts: Vec<Contact>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub domains: Vec<Domain>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub sla_notifications: Vec<SlaNotification>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub sla_priorities: Vec<SlaTicketPriority>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub sla_inboxes: Vec<SlaInbox>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub sla_companies: Vec<SlaCompany>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub sla_customers: Vec<SlaCustomer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub sla_tags: Vec<SlaTag>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl IncludedData {
    /// Decode one of the untyped side-loaded collections, e.g. `"customers"`.
    /// A missing key yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection does not match `T`.
    pub fn collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.other.get(key) {
            Some(value) => serde_json::from_value(value.clone()).map_err(|source| DeskError::Decode {
                source,
                body: value.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }
}
