//! Port abstraction for category persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Category, CategoryDraft, CategoryPatch, ResourceId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "category repository query failed: {message}",
    }
}

/// Category storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Every category, oldest first.
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Fetch a category by identifier.
    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Categories whose name matches exactly.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Insert a new category.
    async fn create(&self, draft: &CategoryDraft) -> Result<Category, CategoryRepositoryError>;

    /// Apply `patch`, returning the updated category or `None` when absent.
    async fn update(
        &self,
        id: &ResourceId,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Remove a category, returning it or `None` when absent.
    async fn delete(&self, id: &ResourceId) -> Result<Option<Category>, CategoryRepositoryError>;
}
