//! Port abstraction for product persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Product, ProductDraft, ProductPatch, ResourceId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by product repository adapters.
    pub enum ProductRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "product repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "product repository query failed: {message}",
    }
}

/// Product storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, oldest first.
    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Fetch a product by identifier.
    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Product>, ProductRepositoryError>;

    /// Insert a new product.
    async fn create(&self, draft: &ProductDraft) -> Result<Product, ProductRepositoryError>;

    /// Apply `patch`, returning the updated product or `None` when absent.
    async fn update(
        &self,
        id: &ResourceId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError>;

    /// Remove a product, returning it or `None` when absent.
    async fn delete(&self, id: &ResourceId) -> Result<Option<Product>, ProductRepositoryError>;
}
