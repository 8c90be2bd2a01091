//! Driving port for product use cases exposed to inbound adapters.
use async_trait::async_trait;

use crate::domain::{ActorClaim, Error, MutationRequest, ResourceId, Product};

/// Product use cases. Callers have already passed the access gate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Every product.
    async fn list(&self) -> Result<Vec<Product>, Error>;

    /// One product, or `NotFound`.
    async fn get(&self, id: &ResourceId) -> Result<Product, Error>;

    /// Validate and store a new product.
    async fn create(&self, actor: &ActorClaim, request: MutationRequest) -> Result<Product, Error>;

    /// Validate and apply an update.
    async fn update(
        &self,
        actor: &ActorClaim,
        id: &ResourceId,
        request: MutationRequest,
    ) -> Result<Product, Error>;

    /// Remove a product.
    async fn delete(&self, actor: &ActorClaim, id: &ResourceId) -> Result<(), Error>;
}
