//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod category_catalog;
mod category_repository;
mod claim_verifier;
mod object_storage;
mod product_catalog;
mod product_repository;
mod topping_catalog;
mod topping_repository;

pub use category_catalog::CategoryCatalog;
#[cfg(test)]
pub use category_catalog::MockCategoryCatalog;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use claim_verifier::MockClaimVerifier;
pub use claim_verifier::{ClaimVerificationError, ClaimVerifier};
#[cfg(test)]
pub use object_storage::MockObjectStorage;
pub use object_storage::{ObjectStorage, ObjectStorageError};
#[cfg(test)]
pub use product_catalog::MockProductCatalog;
pub use product_catalog::ProductCatalog;
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductRepository, ProductRepositoryError};
#[cfg(test)]
pub use topping_catalog::MockToppingCatalog;
pub use topping_catalog::ToppingCatalog;
#[cfg(test)]
pub use topping_repository::MockToppingRepository;
pub use topping_repository::{ToppingRepository, ToppingRepositoryError};
