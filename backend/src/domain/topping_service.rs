//! Topping use cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::payload::decode_payload;
use crate::domain::ports::{
    ObjectStorage, ToppingCatalog, ToppingRepository, ToppingRepositoryError,
};
use crate::domain::validation::{
    ImageRequirement, RuleMode, Validator, image_errors, topping_rules,
};
use crate::domain::{
    ActorClaim, AssetKind, DEFAULT_MAX_UPLOAD_BYTES, Error, ImageReplacement, Mutation,
    MutationRequest, ResourceId, ResourceKind, TenantScope, Topping, ToppingDraft, ToppingPatch,
};

const IMAGE_REQUIRED: &str = "Topping image is required";
const NOTHING_TO_UPDATE: &str = "At least one field (name, price, image) is required to update";

fn map_topping_repository_error(error: ToppingRepositoryError) -> Error {
    match error {
        ToppingRepositoryError::Connection { message } => {
            Error::internal(format!("topping repository unavailable: {message}"))
        }
        ToppingRepositoryError::Query { message } => {
            Error::internal(format!("topping repository error: {message}"))
        }
    }
}

/// Topping service implementing [`ToppingCatalog`].
#[derive(Clone)]
pub struct ToppingService<R> {
    repo: Arc<R>,
    images: ImageReplacement,
    max_upload_bytes: usize,
}

impl<R> ToppingService<R> {
    /// Create a service storing topping images in `storage`.
    pub fn new(repo: Arc<R>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            repo,
            images: ImageReplacement::new(storage, AssetKind::Topping),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Override the accepted image size.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

impl<R> ToppingService<R>
where
    R: ToppingRepository,
{
    async fn find_for(
        &self,
        actor: &ActorClaim,
        id: &ResourceId,
        mutation: Mutation,
    ) -> Result<Topping, Error> {
        let found = self
            .repo
            .find_by_id(id)
            .await
            .map_err(map_topping_repository_error)?;
        TenantScope::resolve_for_mutation(actor, ResourceKind::Topping, mutation, found)
    }
}

#[async_trait]
impl<R> ToppingCatalog for ToppingService<R>
where
    R: ToppingRepository,
{
    async fn list(&self) -> Result<Vec<Topping>, Error> {
        self.repo.list().await.map_err(map_topping_repository_error)
    }

    async fn get(&self, id: &ResourceId) -> Result<Topping, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_topping_repository_error)?
            .ok_or_else(|| ResourceKind::Topping.not_found())
    }

    async fn create(&self, actor: &ActorClaim, request: MutationRequest) -> Result<Topping, Error> {
        let MutationRequest { body, image } = request;
        let mut payload = body.into_payload()?;
        TenantScope::assign_owner(actor, &mut payload)?;
        Validator::new(topping_rules(RuleMode::Create))
            .validate(&mut payload)
            .await?
            .with_errors(image_errors(
                image.as_ref(),
                ImageRequirement::Required(IMAGE_REQUIRED),
                self.max_upload_bytes,
            ))
            .into_result()?;
        let mut draft: ToppingDraft = decode_payload(payload)?;
        let image = image.ok_or_else(|| Error::invalid_request(IMAGE_REQUIRED))?;

        draft.image = self.images.store(&image).await?;
        match self.repo.create(&draft).await {
            Ok(topping) => {
                info!(id = %topping.id, tenant = topping.tenant_id.as_str(), "topping created");
                Ok(topping)
            }
            Err(err) => {
                self.images.discard(&draft.image).await;
                Err(map_topping_repository_error(err))
            }
        }
    }

    async fn update(
        &self,
        actor: &ActorClaim,
        id: &ResourceId,
        request: MutationRequest,
    ) -> Result<Topping, Error> {
        let MutationRequest { body, image } = request;
        let mut payload = body.into_payload()?;
        Validator::new(topping_rules(RuleMode::Update))
            .validate(&mut payload)
            .await?
            .with_errors(image_errors(
                image.as_ref(),
                ImageRequirement::Optional,
                self.max_upload_bytes,
            ))
            .into_result()?;
        let mut patch: ToppingPatch = decode_payload(payload)?;

        let current = self.find_for(actor, id, Mutation::Update).await?;
        // Falsy fields were dropped during validation, so `0` and `""` count as absent.
        if patch.is_empty() && image.is_none() {
            warn!(%id, "topping update carried no fields");
            return Err(Error::invalid_request(NOTHING_TO_UPDATE));
        }

        let replacement = self.images.begin(&current.image, image.as_ref()).await;
        patch.image = replacement.new_reference().map(str::to_owned);
        match self.repo.update(id, &patch).await {
            Ok(Some(topping)) => {
                self.images.finish(replacement).await;
                info!(%id, "topping updated");
                Ok(topping)
            }
            Ok(None) => {
                self.images.abandon(replacement).await;
                Err(ResourceKind::Topping.not_found())
            }
            Err(err) => {
                self.images.abandon(replacement).await;
                Err(map_topping_repository_error(err))
            }
        }
    }

    async fn delete(&self, actor: &ActorClaim, id: &ResourceId) -> Result<(), Error> {
        self.find_for(actor, id, Mutation::Delete).await?;
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(map_topping_repository_error)?
            .ok_or_else(|| ResourceKind::Topping.not_found())?;
        self.images.discard(&deleted.image).await;
        info!(%id, "topping deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "topping_service_tests.rs"]
mod tests;
