//! Category use cases.
//!
//! Categories are shared by every tenant, so mutations pass through the
//! access gate and validation only; there is no ownership check.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::payload::decode_payload;
use crate::domain::ports::{CategoryCatalog, CategoryRepository, CategoryRepositoryError};
use crate::domain::validation::{RuleMode, UniqueCategoryName, Validator, category_rules};
use crate::domain::{
    ActorClaim, Category, CategoryDraft, CategoryPatch, Error, MutationRequest, ResourceId,
    ResourceKind,
};

/// Map category persistence failures onto the domain taxonomy.
pub(crate) fn map_category_repository_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::internal(format!("category repository unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category repository error: {message}"))
        }
    }
}

/// Category service implementing [`CategoryCatalog`].
#[derive(Clone)]
pub struct CategoryService<R> {
    repo: Arc<R>,
}

impl<R> CategoryService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> CategoryService<R>
where
    R: CategoryRepository + 'static,
{
    fn unique_name(&self) -> UniqueCategoryName {
        let repository: Arc<dyn CategoryRepository> = Arc::clone(&self.repo) as _;
        UniqueCategoryName::new(repository)
    }
}

#[async_trait]
impl<R> CategoryCatalog for CategoryService<R>
where
    R: CategoryRepository + 'static,
{
    async fn list(&self) -> Result<Vec<Category>, Error> {
        self.repo.list().await.map_err(map_category_repository_error)
    }

    async fn get(&self, id: &ResourceId) -> Result<Category, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_category_repository_error)?
            .ok_or_else(|| ResourceKind::Category.not_found())
    }

    async fn create(&self, actor: &ActorClaim, request: MutationRequest) -> Result<Category, Error> {
        let mut payload = request.body.into_payload()?;
        Validator::new(category_rules(self.unique_name(), RuleMode::Create))
            .validate(&mut payload)
            .await?
            .into_result()?;
        let draft: CategoryDraft = decode_payload(payload)?;
        let category = self
            .repo
            .create(&draft)
            .await
            .map_err(map_category_repository_error)?;
        info!(id = %category.id, subject = actor.subject(), "category created");
        Ok(category)
    }

    async fn update(
        &self,
        actor: &ActorClaim,
        id: &ResourceId,
        request: MutationRequest,
    ) -> Result<Category, Error> {
        let mut payload = request.body.into_payload()?;
        let unique = self.unique_name().excluding(id.clone());
        Validator::new(category_rules(unique, RuleMode::Update))
            .validate(&mut payload)
            .await?
            .into_result()?;
        let patch: CategoryPatch = decode_payload(payload)?;
        let category = self
            .repo
            .update(id, &patch)
            .await
            .map_err(map_category_repository_error)?
            .ok_or_else(|| ResourceKind::Category.not_found())?;
        info!(%id, subject = actor.subject(), "category updated");
        Ok(category)
    }

    async fn delete(&self, actor: &ActorClaim, id: &ResourceId) -> Result<(), Error> {
        self.repo
            .delete(id)
            .await
            .map_err(map_category_repository_error)?
            .ok_or_else(|| ResourceKind::Category.not_found())?;
        info!(%id, subject = actor.subject(), "category deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "category_service_tests.rs"]
mod tests;
