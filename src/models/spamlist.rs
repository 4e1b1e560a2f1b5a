//! Spam allow/deny list entries.

use serde::{Deserialize, Serialize};

use super::common::BaseEntity;

/// A spamlist entry. `term` is an email address, domain or IP address;
/// `kind` is `whitelist` or `blacklist`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spamlist {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub term: String,
    #[serde(rename = "type")]
    pub kind: String,
}
