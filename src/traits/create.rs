//! Create trait for new entities.

use async_trait::async_trait;

use crate::error::Result;

/// Create a new entity.
///
/// The server assigns the identifier; the returned envelope carries it.
#[async_trait]
pub trait Create {
    /// The singular envelope sent and returned.
    type Entity;

    /// # Errors
    ///
    /// Returns an error if the request fails, the server does not answer
    /// `201 Created`, or the body cannot be decoded.
    async fn create(&self, entity: &Self::Entity) -> Result<Self::Entity>;
}
