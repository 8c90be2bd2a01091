//! PostgreSQL-backed `ProductRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Product, ProductDraft, ProductPatch, ResourceId, TenantId};

use super::diesel_basic_error_mapping::{
    decode_json, encode_json, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewProductRow, ProductRow, ProductUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::products;

/// Diesel-backed implementation of the product repository port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProductRepositoryError {
    map_basic_pool_error(error, |message| ProductRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> ProductRepositoryError {
    map_basic_diesel_error(
        error,
        ProductRepositoryError::query,
        ProductRepositoryError::connection,
    )
}

fn query_error(message: String) -> ProductRepositoryError {
    ProductRepositoryError::query(message)
}

fn stored_id(raw: &str, column: &str) -> Result<ResourceId, ProductRepositoryError> {
    ResourceId::parse(raw.trim())
        .map_err(|err| ProductRepositoryError::query(format!("stored {column} {raw}: {err}")))
}

fn row_to_product(row: ProductRow) -> Result<Product, ProductRepositoryError> {
    let ProductRow {
        id,
        name,
        description,
        image_url,
        price_configuration,
        attributes,
        tenant_id,
        category_id,
        is_published,
        created_at,
        updated_at,
    } = row;
    Ok(Product {
        id: stored_id(&id, "id")?,
        name,
        description,
        image_url,
        price_configuration: decode_json(price_configuration, "price_configuration", query_error)?,
        attributes: decode_json(attributes, "attributes", query_error)?,
        tenant_id: TenantId::new(tenant_id)
            .map_err(|err| ProductRepositoryError::query(format!("stored tenant: {err}")))?,
        category_id: stored_id(&category_id, "category_id")?,
        is_published,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProductRow> = products::table
            .select(ProductRow::as_select())
            .order_by(products::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_product).collect()
    }

    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProductRow> = products::table
            .find(id.as_str())
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_product).transpose()
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, ProductRepositoryError> {
        let id = ResourceId::generate();
        let new_row = NewProductRow {
            id: id.as_str(),
            name: &draft.name,
            description: &draft.description,
            image_url: &draft.image_url,
            price_configuration: encode_json(
                &draft.price_configuration,
                "price_configuration",
                query_error,
            )?,
            attributes: encode_json(&draft.attributes, "attributes", query_error)?,
            tenant_id: draft.tenant_id.as_str(),
            category_id: draft.category_id.as_str(),
            is_published: draft.is_published,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: ProductRow = diesel::insert_into(products::table)
            .values(&new_row)
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_product(row)
    }

    async fn update(
        &self,
        id: &ResourceId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let changeset = ProductUpdate {
            name: patch.name.as_deref(),
            description: patch.description.as_deref(),
            image_url: patch.image_url.as_deref(),
            price_configuration: patch
                .price_configuration
                .as_ref()
                .map(|value| encode_json(value, "price_configuration", query_error))
                .transpose()?,
            attributes: patch
                .attributes
                .as_ref()
                .map(|value| encode_json(value, "attributes", query_error))
                .transpose()?,
            category_id: patch.category_id.as_ref().map(ResourceId::as_str),
            is_published: patch.is_published,
            updated_at: Utc::now(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProductRow> = diesel::update(products::table.find(id.as_str()))
            .set(&changeset)
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_product).transpose()
    }

    async fn delete(&self, id: &ResourceId) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProductRow> = diesel::delete(products::table.find(id.as_str()))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_product).transpose()
    }
}
