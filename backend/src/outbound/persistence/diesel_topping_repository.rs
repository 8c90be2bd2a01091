//! PostgreSQL-backed `ToppingRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ToppingRepository, ToppingRepositoryError};
use crate::domain::{ResourceId, TenantId, Topping, ToppingDraft, ToppingPatch};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewToppingRow, ToppingRow, ToppingUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::toppings;

/// Diesel-backed implementation of the topping repository port.
#[derive(Clone)]
pub struct DieselToppingRepository {
    pool: DbPool,
}

impl DieselToppingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ToppingRepositoryError {
    map_basic_pool_error(error, |message| ToppingRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> ToppingRepositoryError {
    map_basic_diesel_error(
        error,
        ToppingRepositoryError::query,
        ToppingRepositoryError::connection,
    )
}

fn row_to_topping(row: ToppingRow) -> Result<Topping, ToppingRepositoryError> {
    let ToppingRow {
        id,
        name,
        price,
        image,
        tenant_id,
        created_at,
        updated_at,
    } = row;
    Ok(Topping {
        id: ResourceId::parse(id.trim())
            .map_err(|err| ToppingRepositoryError::query(format!("stored id {id}: {err}")))?,
        name,
        price,
        image,
        tenant_id: TenantId::new(tenant_id)
            .map_err(|err| ToppingRepositoryError::query(format!("stored tenant: {err}")))?,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl ToppingRepository for DieselToppingRepository {
    async fn list(&self) -> Result<Vec<Topping>, ToppingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ToppingRow> = toppings::table
            .select(ToppingRow::as_select())
            .order_by(toppings::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_topping).collect()
    }

    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Topping>, ToppingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ToppingRow> = toppings::table
            .find(id.as_str())
            .select(ToppingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_topping).transpose()
    }

    async fn create(&self, draft: &ToppingDraft) -> Result<Topping, ToppingRepositoryError> {
        let id = ResourceId::generate();
        let new_row = NewToppingRow {
            id: id.as_str(),
            name: &draft.name,
            price: draft.price,
            image: &draft.image,
            tenant_id: draft.tenant_id.as_str(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: ToppingRow = diesel::insert_into(toppings::table)
            .values(&new_row)
            .returning(ToppingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_topping(row)
    }

    async fn update(
        &self,
        id: &ResourceId,
        patch: &ToppingPatch,
    ) -> Result<Option<Topping>, ToppingRepositoryError> {
        let changeset = ToppingUpdate {
            name: patch.name.as_deref(),
            price: patch.price,
            image: patch.image.as_deref(),
            updated_at: Utc::now(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ToppingRow> = diesel::update(toppings::table.find(id.as_str()))
            .set(&changeset)
            .returning(ToppingRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_topping).transpose()
    }

    async fn delete(&self, id: &ResourceId) -> Result<Option<Topping>, ToppingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ToppingRow> = diesel::delete(toppings::table.find(id.as_str()))
            .returning(ToppingRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_topping).transpose()
    }
}
