//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Desk API server. Entities
//! are kept as JSON objects per collection so every resource shares one
//! store and one set of handlers.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// Envelope keys for one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    /// Path segment and collection name, e.g. `tickettypes`.
    pub path: &'static str,
    /// Key of the singular envelope, e.g. `tickettype`.
    pub singular: &'static str,
    /// Key of the list envelope.
    pub plural: &'static str,
}

const fn kind(path: &'static str, singular: &'static str) -> ResourceKind {
    ResourceKind {
        path,
        singular,
        plural: path,
    }
}

/// Every collection the server serves.
pub const RESOURCES: &[ResourceKind] = &[
    kind("businesshours", "businesshour"),
    kind("companies", "company"),
    kind("customers", "customer"),
    kind("files", "file"),
    kind("helpdocarticles", "helpdocarticle"),
    kind("helpdocsites", "helpdocsite"),
    kind("inboxes", "inbox"),
    kind("slas", "sla"),
    kind("spamlists", "spamlist"),
    kind("tags", "tag"),
    kind("ticketpriorities", "ticketpriority"),
    kind("tickets", "ticket"),
    kind("ticketsources", "ticketsource"),
    kind("ticketstatuses", "ticketstatus"),
    kind("tickettypes", "tickettype"),
    kind("users", "user"),
];

/// Look up a collection by its path segment.
pub fn resource(path: &str) -> Option<&'static ResourceKind> {
    RESOURCES.iter().find(|r| r.path == path)
}

/// A multipart body received by the upload sink.
#[derive(Debug, Clone)]
pub struct Upload {
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Upload {
    /// Whether the form carries a field or file part called `name`.
    pub fn has_field(&self, name: &str) -> bool {
        let needle = format!("name=\"{name}\"");
        String::from_utf8_lossy(&self.body).contains(&needle)
    }
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Entities per collection, indexed by ID.
    pub collections: HashMap<&'static str, BTreeMap<u64, Value>>,

    /// Bodies posted to the upload sink, in arrival order.
    pub uploads: Vec<Upload>,

    /// Base URL the server listens on; used in upload descriptors.
    pub base_url: String,

    /// Optional authentication token. If set, API requests must carry it as
    /// a bearer token.
    pub required_token: Option<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Seed an entity. Entities without an ID get the next free one.
    pub fn with_entity<T: Serialize>(mut self, collection: &str, entity: &T) -> Self {
        if let (Some(kind), Ok(Value::Object(fields))) =
            (resource(collection), serde_json::to_value(entity))
        {
            self.insert(kind, fields);
        }
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Store a new entity and return it as stored.
    ///
    /// A positive `id` in `fields` is kept; otherwise the server assigns
    /// one past the highest in the collection.
    pub fn insert(&mut self, kind: &ResourceKind, mut fields: Map<String, Value>) -> Value {
        let items = self.collections.entry(kind.path).or_default();
        let id = match fields.get("id").and_then(Value::as_u64) {
            Some(id) if id > 0 => id,
            _ => items.keys().next_back().copied().unwrap_or(0) + 1,
        };
        fields.insert("id".to_string(), Value::from(id));
        fields
            .entry("state")
            .or_insert_with(|| Value::from("active"));

        let entity = Value::Object(fields);
        items.insert(id, entity.clone());
        entity
    }

    /// Get an entity by ID.
    pub fn get(&self, kind: &ResourceKind, id: u64) -> Option<&Value> {
        self.collections.get(kind.path)?.get(&id)
    }

    /// All entities in a collection, in ID order.
    pub fn list(&self, kind: &ResourceKind) -> Vec<&Value> {
        self.collections
            .get(kind.path)
            .map(|items| items.values().collect())
            .unwrap_or_default()
    }

    /// Overwrite the given fields of an entity and return the result.
    /// The ID cannot change.
    pub fn update(
        &mut self,
        kind: &ResourceKind,
        id: u64,
        fields: Map<String, Value>,
    ) -> Option<&Value> {
        let entity = self.collections.get_mut(kind.path)?.get_mut(&id)?;
        if let Value::Object(existing) = &mut *entity {
            for (key, value) in fields {
                if key != "id" {
                    existing.insert(key, value);
                }
            }
        }
        Some(&*entity)
    }

    /// Tickets matching the search criteria. Text matches subject or
    /// message, case-insensitively; empty ID lists match everything.
    pub fn search_tickets(&self, text: Option<&str>, inboxes: &[u64], statuses: &[u64]) -> Vec<&Value> {
        let needle = text.map(str::to_lowercase);
        let Some(tickets) = resource("tickets") else {
            return Vec::new();
        };

        self.list(tickets)
            .into_iter()
            .filter(|ticket| {
                needle.as_deref().map_or(true, |needle| {
                    ["subject", "message"].iter().any(|field| {
                        ticket[*field]
                            .as_str()
                            .is_some_and(|s| s.to_lowercase().contains(needle))
                    })
                })
            })
            .filter(|ticket| references(ticket, "inbox", inboxes))
            .filter(|ticket| references(ticket, "status", statuses))
            .collect()
    }
}

fn references(entity: &Value, field: &str, ids: &[u64]) -> bool {
    ids.is_empty()
        || entity[field]["id"]
            .as_u64()
            .is_some_and(|id| ids.contains(&id))
}
