//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::error::Result;

/// Fetch a single entity by ID, with its related data side-loaded.
///
/// # Example
///
/// ```ignore
/// use desk_client::{DeskClient, Get};
///
/// let client = DeskClient::from_env()?;
/// let ticket = client.tickets().get(42).await?;
/// println!("{}", ticket.ticket.subject);
/// ```
#[async_trait]
pub trait Get {
    /// The singular response envelope.
    type Entity;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server does not answer
    /// `200 OK`, or the body cannot be decoded.
    async fn get(&self, id: u64) -> Result<Self::Entity>;
}
