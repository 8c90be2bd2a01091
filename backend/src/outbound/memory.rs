//! In-process repositories used when no database URL is configured.
//!
//! Records live in insertion order behind a mutex and vanish on restart.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, ProductRepository, ProductRepositoryError,
    ToppingRepository, ToppingRepositoryError,
};
use crate::domain::{
    Category, CategoryDraft, CategoryPatch, Product, ProductDraft, ProductPatch, ResourceId,
    Topping, ToppingDraft, ToppingPatch,
};

const POISONED: &str = "in-memory store lock poisoned";
const UNIQUE_VIOLATION: &str = "unique constraint violated";

/// Ordered records keyed by their identifier.
struct Records<T> {
    rows: Mutex<Vec<T>>,
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Clone> Records<T> {
    fn lock<E>(&self, poisoned: impl FnOnce(&'static str) -> E) -> Result<MutexGuard<'_, Vec<T>>, E> {
        self.rows.lock().map_err(|_| poisoned(POISONED))
    }

    fn all<E>(&self, poisoned: impl FnOnce(&'static str) -> E) -> Result<Vec<T>, E> {
        Ok(self.lock(poisoned)?.clone())
    }

    fn find<E>(
        &self,
        matches: impl Fn(&T) -> bool,
        poisoned: impl FnOnce(&'static str) -> E,
    ) -> Result<Option<T>, E> {
        Ok(self.lock(poisoned)?.iter().find(|row| matches(row)).cloned())
    }

    fn insert<E>(&self, row: T, poisoned: impl FnOnce(&'static str) -> E) -> Result<T, E> {
        self.lock(poisoned)?.push(row.clone());
        Ok(row)
    }

    /// Append `row` unless a stored row `clashes` with it.
    fn insert_unique<E>(
        &self,
        row: T,
        clashes: impl Fn(&T, &T) -> bool,
        error: impl Fn(&'static str) -> E,
    ) -> Result<T, E> {
        let mut rows = self.lock(&error)?;
        if rows.iter().any(|stored| clashes(stored, &row)) {
            return Err(error(UNIQUE_VIOLATION));
        }
        rows.push(row.clone());
        Ok(row)
    }

    /// Like `modify`, but refuses a change that makes the row clash with
    /// another stored row.
    fn modify_unique<E>(
        &self,
        matches: impl Fn(&T) -> bool,
        change: impl FnOnce(&mut T),
        clashes: impl Fn(&T, &T) -> bool,
        error: impl Fn(&'static str) -> E,
    ) -> Result<Option<T>, E> {
        let mut rows = self.lock(&error)?;
        let Some(mut candidate) = rows.iter().find(|row| matches(row)).cloned() else {
            return Ok(None);
        };
        change(&mut candidate);
        if rows
            .iter()
            .any(|other| !matches(other) && clashes(other, &candidate))
        {
            return Err(error(UNIQUE_VIOLATION));
        }
        if let Some(stored) = rows.iter_mut().find(|row| matches(row)) {
            stored.clone_from(&candidate);
        }
        Ok(Some(candidate))
    }

    fn modify<E>(
        &self,
        matches: impl Fn(&T) -> bool,
        change: impl FnOnce(&mut T),
        poisoned: impl FnOnce(&'static str) -> E,
    ) -> Result<Option<T>, E> {
        let mut rows = self.lock(poisoned)?;
        Ok(rows.iter_mut().find(|row| matches(row)).map(|row| {
            change(row);
            row.clone()
        }))
    }

    fn remove<E>(
        &self,
        matches: impl Fn(&T) -> bool,
        poisoned: impl FnOnce(&'static str) -> E,
    ) -> Result<Option<T>, E> {
        let mut rows = self.lock(poisoned)?;
        Ok(rows
            .iter()
            .position(|row| matches(row))
            .map(|index| rows.remove(index)))
    }
}

/// Category names are unique, as in the `categories_name_key` constraint.
fn same_name(stored: &Category, candidate: &Category) -> bool {
    stored.name == candidate.name
}

/// Category repository kept in memory.
#[derive(Default)]
pub struct MemoryCategoryRepository {
    records: Records<Category>,
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        self.records.all(CategoryRepositoryError::query)
    }

    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Category>, CategoryRepositoryError> {
        self.records
            .find(|row| &row.id == id, CategoryRepositoryError::query)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Category>, CategoryRepositoryError> {
        Ok(self
            .records
            .all(CategoryRepositoryError::query)?
            .into_iter()
            .filter(|row| row.name == name)
            .collect())
    }

    async fn create(&self, draft: &CategoryDraft) -> Result<Category, CategoryRepositoryError> {
        let now = Utc::now();
        let category = Category {
            id: ResourceId::generate(),
            name: draft.name.clone(),
            price_configuration: draft.price_configuration.clone(),
            attributes: draft.attributes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.records
            .insert_unique(category, same_name, CategoryRepositoryError::query)
    }

    async fn update(
        &self,
        id: &ResourceId,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        self.records.modify_unique(
            |row| &row.id == id,
            |row| {
                patch.apply_to(row);
                row.updated_at = Utc::now();
            },
            same_name,
            CategoryRepositoryError::query,
        )
    }

    async fn delete(&self, id: &ResourceId) -> Result<Option<Category>, CategoryRepositoryError> {
        self.records
            .remove(|row| &row.id == id, CategoryRepositoryError::query)
    }
}

/// Product repository kept in memory.
#[derive(Default)]
pub struct MemoryProductRepository {
    records: Records<Product>,
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        self.records.all(ProductRepositoryError::query)
    }

    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Product>, ProductRepositoryError> {
        self.records
            .find(|row| &row.id == id, ProductRepositoryError::query)
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, ProductRepositoryError> {
        let now = Utc::now();
        let product = Product {
            id: ResourceId::generate(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
            price_configuration: draft.price_configuration.clone(),
            attributes: draft.attributes.clone(),
            tenant_id: draft.tenant_id.clone(),
            category_id: draft.category_id.clone(),
            is_published: draft.is_published,
            created_at: now,
            updated_at: now,
        };
        self.records.insert(product, ProductRepositoryError::query)
    }

    async fn update(
        &self,
        id: &ResourceId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        self.records.modify(
            |row| &row.id == id,
            |row| {
                patch.apply_to(row);
                row.updated_at = Utc::now();
            },
            ProductRepositoryError::query,
        )
    }

    async fn delete(&self, id: &ResourceId) -> Result<Option<Product>, ProductRepositoryError> {
        self.records
            .remove(|row| &row.id == id, ProductRepositoryError::query)
    }
}

/// Topping repository kept in memory.
#[derive(Default)]
pub struct MemoryToppingRepository {
    records: Records<Topping>,
}

#[async_trait]
impl ToppingRepository for MemoryToppingRepository {
    async fn list(&self) -> Result<Vec<Topping>, ToppingRepositoryError> {
        self.records.all(ToppingRepositoryError::query)
    }

    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Topping>, ToppingRepositoryError> {
        self.records
            .find(|row| &row.id == id, ToppingRepositoryError::query)
    }

    async fn create(&self, draft: &ToppingDraft) -> Result<Topping, ToppingRepositoryError> {
        let now = Utc::now();
        let topping = Topping {
            id: ResourceId::generate(),
            name: draft.name.clone(),
            price: draft.price,
            image: draft.image.clone(),
            tenant_id: draft.tenant_id.clone(),
            created_at: now,
            updated_at: now,
        };
        self.records.insert(topping, ToppingRepositoryError::query)
    }

    async fn update(
        &self,
        id: &ResourceId,
        patch: &ToppingPatch,
    ) -> Result<Option<Topping>, ToppingRepositoryError> {
        self.records.modify(
            |row| &row.id == id,
            |row| {
                patch.apply_to(row);
                row.updated_at = Utc::now();
            },
            ToppingRepositoryError::query,
        )
    }

    async fn delete(&self, id: &ResourceId) -> Result<Option<Topping>, ToppingRepositoryError> {
        self.records
            .remove(|row| &row.id == id, ToppingRepositoryError::query)
    }
}
