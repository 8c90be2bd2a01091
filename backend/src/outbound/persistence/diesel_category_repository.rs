//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{Category, CategoryDraft, CategoryPatch, ResourceId};

use super::diesel_basic_error_mapping::{
    decode_json, encode_json, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{CategoryRow, CategoryUpdate, NewCategoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::categories;

/// Diesel-backed implementation of the category repository port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CategoryRepositoryError {
    map_basic_pool_error(error, |message| {
        CategoryRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> CategoryRepositoryError {
    map_basic_diesel_error(
        error,
        CategoryRepositoryError::query,
        CategoryRepositoryError::connection,
    )
}

fn query_error(message: String) -> CategoryRepositoryError {
    CategoryRepositoryError::query(message)
}

fn row_to_category(row: CategoryRow) -> Result<Category, CategoryRepositoryError> {
    let CategoryRow {
        id,
        name,
        price_configuration,
        attributes,
        created_at,
        updated_at,
    } = row;
    Ok(Category {
        id: ResourceId::parse(id.trim())
            .map_err(|err| CategoryRepositoryError::query(format!("stored id {id}: {err}")))?,
        name,
        price_configuration: decode_json(price_configuration, "price_configuration", query_error)?,
        attributes: decode_json(attributes, "attributes", query_error)?,
        created_at,
        updated_at,
    })
}

fn rows_to_categories(rows: Vec<CategoryRow>) -> Result<Vec<Category>, CategoryRepositoryError> {
    rows.into_iter().map(row_to_category).collect()
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CategoryRow> = categories::table
            .select(CategoryRow::as_select())
            .order_by(categories::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_categories(rows)
    }

    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CategoryRow> = categories::table
            .find(id.as_str())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_category).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CategoryRow> = categories::table
            .filter(categories::name.eq(name))
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_categories(rows)
    }

    async fn create(&self, draft: &CategoryDraft) -> Result<Category, CategoryRepositoryError> {
        let id = ResourceId::generate();
        let new_row = NewCategoryRow {
            id: id.as_str(),
            name: &draft.name,
            price_configuration: encode_json(
                &draft.price_configuration,
                "price_configuration",
                query_error,
            )?,
            attributes: encode_json(&draft.attributes, "attributes", query_error)?,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: CategoryRow = diesel::insert_into(categories::table)
            .values(&new_row)
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_category(row)
    }

    async fn update(
        &self,
        id: &ResourceId,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let changeset = CategoryUpdate {
            name: patch.name.as_deref(),
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
            updated_at: Utc::now(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CategoryRow> = diesel::update(categories::table.find(id.as_str()))
            .set(&changeset)
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_category).transpose()
    }

    async fn delete(&self, id: &ResourceId) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CategoryRow> = diesel::delete(categories::table.find(id.as_str()))
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_category).transpose()
    }
}
