//! Driving port for topping use cases exposed to inbound adapters.
use async_trait::async_trait;

use crate::domain::{ActorClaim, Error, MutationRequest, ResourceId, Topping};

/// Topping use cases. Callers have already passed the access gate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToppingCatalog: Send + Sync {
    /// Every topping.
    async fn list(&self) -> Result<Vec<Topping>, Error>;

    /// One topping, or `NotFound`.
    async fn get(&self, id: &ResourceId) -> Result<Topping, Error>;

    /// Validate and store a new topping.
    async fn create(&self, actor: &ActorClaim, request: MutationRequest) -> Result<Topping, Error>;

    /// Validate and apply an update.
    async fn update(
        &self,
        actor: &ActorClaim,
        id: &ResourceId,
        request: MutationRequest,
    ) -> Result<Topping, Error>;

    /// Remove a topping.
    async fn delete(&self, actor: &ActorClaim, id: &ResourceId) -> Result<(), Error>;
}
