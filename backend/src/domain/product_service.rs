//! Product use cases.
//!
//! Products need an image on create: either an uploaded file, stored before
//! the record is written, or a direct `imageUrl`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::info;

use crate::domain::payload::decode_payload;
use crate::domain::ports::{
    ObjectStorage, ProductCatalog, ProductRepository, ProductRepositoryError,
};
use crate::domain::validation::{
    ImageRequirement, RuleMode, Validator, image_errors, is_falsy, product_rules,
};
use crate::domain::{
    ActorClaim, AssetKind, DEFAULT_MAX_UPLOAD_BYTES, Error, ImageReplacement, Mutation,
    MutationRequest, Product, ProductDraft, ProductPatch, Replacement, ResourceId, ResourceKind,
    TenantScope,
};

const IMAGE_REQUIRED: &str = "Product image is required";
const IMAGE_URL_FIELD: &str = "imageUrl";

fn map_product_repository_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => {
            Error::internal(format!("product repository unavailable: {message}"))
        }
        ProductRepositoryError::Query { message } => {
            Error::internal(format!("product repository error: {message}"))
        }
    }
}

fn create_image_requirement(payload: &Map<String, Value>) -> ImageRequirement {
    match payload.get(IMAGE_URL_FIELD) {
        Some(url) if !is_falsy(url) => ImageRequirement::Optional,
        _ => ImageRequirement::Required(IMAGE_REQUIRED),
    }
}

/// Product service implementing [`ProductCatalog`].
#[derive(Clone)]
pub struct ProductService<R> {
    repo: Arc<R>,
    images: ImageReplacement,
    max_upload_bytes: usize,
}

impl<R> ProductService<R> {
    /// Create a service storing product images in `storage`.
    pub fn new(repo: Arc<R>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            repo,
            images: ImageReplacement::new(storage, AssetKind::Product),
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

impl<R> ProductService<R>
where
    R: ProductRepository,
{
    async fn find_for(
        &self,
        actor: &ActorClaim,
        id: &ResourceId,
        mutation: Mutation,
    ) -> Result<Product, Error> {
        let found = self
            .repo
            .find_by_id(id)
            .await
            .map_err(map_product_repository_error)?;
        TenantScope::resolve_for_mutation(actor, ResourceKind::Product, mutation, found)
    }
}

#[async_trait]
impl<R> ProductCatalog for ProductService<R>
where
    R: ProductRepository,
{
    async fn list(&self) -> Result<Vec<Product>, Error> {
        self.repo.list().await.map_err(map_product_repository_error)
    }

    async fn get(&self, id: &ResourceId) -> Result<Product, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_product_repository_error)?
            .ok_or_else(|| ResourceKind::Product.not_found())
    }

    async fn create(&self, actor: &ActorClaim, request: MutationRequest) -> Result<Product, Error> {
        let MutationRequest { body, image } = request;
        let mut payload = body.into_payload()?;
        TenantScope::assign_owner(actor, &mut payload)?;
        let requirement = create_image_requirement(&payload);
        Validator::new(product_rules(RuleMode::Create, image.is_some()))
            .validate(&mut payload)
            .await?
            .with_errors(image_errors(image.as_ref(), requirement, self.max_upload_bytes))
            .into_result()?;
        let mut draft: ProductDraft = decode_payload(payload)?;

        let uploaded = match &image {
            Some(image) => {
                draft.image_url = self.images.store(image).await?;
                true
            }
            None => false,
        };
        match self.repo.create(&draft).await {
            Ok(product) => {
                info!(id = %product.id, tenant = product.tenant_id.as_str(), "product created");
                Ok(product)
            }
            Err(err) => {
                if uploaded {
                    self.images.discard(&draft.image_url).await;
                }
                Err(map_product_repository_error(err))
            }
        }
    }

    async fn update(
        &self,
        actor: &ActorClaim,
        id: &ResourceId,
        request: MutationRequest,
    ) -> Result<Product, Error> {
        let MutationRequest { body, image } = request;
        let mut payload = body.into_payload()?;
        Validator::new(product_rules(RuleMode::Update, image.is_some()))
            .validate(&mut payload)
            .await?
            .with_errors(image_errors(
                image.as_ref(),
                ImageRequirement::Optional,
                self.max_upload_bytes,
            ))
            .into_result()?;
        let mut patch: ProductPatch = decode_payload(payload)?;

        let current = self.find_for(actor, id, Mutation::Update).await?;
        let replacement = self.images.begin(&current.image_url, image.as_ref()).await;
        match &replacement {
            Replacement::Uploaded { uri, .. } => patch.image_url = Some(uri.clone()),
            Replacement::Retained => patch.image_url = None,
            Replacement::NoImage => {}
        }
        match self.repo.update(id, &patch).await {
            Ok(Some(product)) => {
                self.images.finish(replacement).await;
                info!(%id, "product updated");
                Ok(product)
            }
            Ok(None) => {
                self.images.abandon(replacement).await;
                Err(ResourceKind::Product.not_found())
            }
            Err(err) => {
                self.images.abandon(replacement).await;
                Err(map_product_repository_error(err))
            }
        }
    }

    async fn delete(&self, actor: &ActorClaim, id: &ResourceId) -> Result<(), Error> {
        self.find_for(actor, id, Mutation::Delete).await?;
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(map_product_repository_error)?
            .ok_or_else(|| ResourceKind::Product.not_found())?;
        self.images.discard(&deleted.image_url).await;
        info!(%id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "product_service_tests.rs"]
mod tests;
