//! Driving port for category use cases exposed to inbound adapters.
use async_trait::async_trait;

use crate::domain::{ActorClaim, Error, MutationRequest, ResourceId, Category};

/// Category use cases. Callers have already passed the access gate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryCatalog: Send + Sync {
    /// Every category.
    async fn list(&self) -> Result<Vec<Category>, Error>;

    /// One category, or `NotFound`.
    async fn get(&self, id: &ResourceId) -> Result<Category, Error>;

    /// Validate and store a new category.
    async fn create(&self, actor: &ActorClaim, request: MutationRequest) -> Result<Category, Error>;

    /// Validate and apply an update.
    async fn update(
        &self,
        actor: &ActorClaim,
        id: &ResourceId,
        request: MutationRequest,
    ) -> Result<Category, Error>;

    /// Remove a category.
    async fn delete(&self, actor: &ActorClaim, id: &ResourceId) -> Result<(), Error>;
}
