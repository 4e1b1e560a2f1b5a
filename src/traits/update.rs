//! Replacing an entity with PUT.

use async_trait::async_trait;

use crate::error::Result;

/// Overwrite an entity by ID with a full envelope.
///
/// # Example
///
/// ```ignore
/// use desk_client::{DeskClient, Get, Update};
///
/// let client = DeskClient::from_env()?;
/// let mut tag = client.tags().get(7).await?;
/// tag.tag.name = "escalated".to_string();
/// let updated = client.tags().update(7, &tag).await?;
/// ```
#[async_trait]
pub trait Update {
    /// The singular envelope sent and returned.
    type Entity;

    /// Send `entity` for `id` and return what the server stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server does not answer
    /// `200 OK`, or the body cannot be decoded.
    async fn update(&self, id: u64, entity: &Self::Entity) -> Result<Self::Entity>;
}
