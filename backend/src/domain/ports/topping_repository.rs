//! Port abstraction for topping persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{ResourceId, Topping, ToppingDraft, ToppingPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by topping repository adapters.
    pub enum ToppingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "topping repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "topping repository query failed: {message}",
    }
}

/// Topping storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToppingRepository: Send + Sync {
    /// Every topping, oldest first.
    async fn list(&self) -> Result<Vec<Topping>, ToppingRepositoryError>;

    /// Fetch a topping by identifier.
    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Topping>, ToppingRepositoryError>;

    /// Insert a new topping.
    async fn create(&self, draft: &ToppingDraft) -> Result<Topping, ToppingRepositoryError>;

    /// Apply `patch`, returning the updated topping or `None` when absent.
    async fn update(
        &self,
        id: &ResourceId,
        patch: &ToppingPatch,
    ) -> Result<Option<Topping>, ToppingRepositoryError>;

    /// Remove a topping, returning it or `None` when absent.
    async fn delete(&self, id: &ResourceId) -> Result<Option<Topping>, ToppingRepositoryError>;
}
