//! List trait for fetching collections of entities.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// List entities with caller-supplied query parameters.
///
/// # Example
///
/// ```ignore
/// use desk_client::{DeskClient, FilterBuilder, List, ListOptions};
///
/// let client = DeskClient::from_env()?;
/// let options = ListOptions::for_page(1, 50)
///     .filter(&FilterBuilder::new().eq("status", "open"));
/// let page = client.tickets().list(&options).await?;
/// println!("{} tickets", page.tickets.len());
/// ```
#[async_trait]
pub trait List {
    /// The collection response envelope.
    type Page;

    /// Fetch one page of entities.
    ///
    /// `query` is encoded verbatim into the query string; pass
    /// [`ListOptions`](crate::ListOptions) for the common parameters or any
    /// serializable struct or map.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server does not answer
    /// `200 OK`, or the body cannot be decoded.
    async fn list<Q>(&self, query: &Q) -> Result<Self::Page>
    where
        Q: Serialize + ?Sized + Sync;
}
