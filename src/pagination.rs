//! Pagination metadata and list query parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::filter::FilterBuilder;

/// Pagination block of a collection response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    /// Total number of records across all pages.
    pub records: u64,
    /// Number of items per page.
    pub page_size: u32,
    /// Total number of pages.
    pub pages: u32,
    /// Current page number (1-indexed).
    pub page: u32,
    /// Whether the server reports further pages.
    pub has_more_pages: bool,
}

impl Pagination {
    /// Whether another page follows this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more_pages || self.page < self.pages
    }
}

/// Query parameters for list endpoints.
///
/// Unset fields are left out of the query string. Anything the typed
/// fields do not cover can be added with [`ListOptions::param`].
///
/// ```
/// use desk_client::{FilterBuilder, ListOptions};
///
/// let options = ListOptions::for_page(2, 50)
///     .sort("createdAt", "desc")
///     .filter(&FilterBuilder::new().eq("status", "open"));
/// assert_eq!(options.page, Some(2));
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListOptions {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Number of items per page.
    pub per_page: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    /// Related resources to embed.
    pub embed: Option<String>,
    /// Sparse field selection.
    pub fields: Option<String>,
    /// Free-text search.
    pub q: Option<String>,
    /// Encoded filter expression.
    pub filter: Option<String>,
    /// Additional parameters, passed through verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ListOptions {
    /// Options for a specific page.
    #[must_use]
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn sort(mut self, by: impl Into<String>, dir: impl Into<String>) -> Self {
        self.sort_by = Some(by.into());
        self.sort_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn embed(mut self, embed: impl Into<String>) -> Self {
        self.embed = Some(embed.into());
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    #[must_use]
    pub fn search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Attach a filter expression. An empty filter is left out.
    #[must_use]
    pub fn filter(mut self, filter: &FilterBuilder) -> Self {
        self.filter = (!filter.is_empty()).then(|| filter.build());
        self
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
