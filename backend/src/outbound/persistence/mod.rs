//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows and catalog
//! entities. Row structs (`models.rs`) and table definitions (`schema.rs`)
//! stay private to this module. Connections come from a `bb8` pool managed
//! through `diesel-async`; JSON columns hold price configurations and
//! attributes.
//!
//! # Example
//!
//! ```no_run
//! use catalog::outbound::persistence::{DbPool, DieselToppingRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/catalog")).await?;
//! let toppings = DieselToppingRepository::new(pool);
//! # let _ = toppings;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_category_repository;
mod diesel_product_repository;
mod diesel_topping_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use diesel_topping_repository::DieselToppingRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
