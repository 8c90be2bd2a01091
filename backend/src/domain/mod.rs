//! Catalog domain: entities, policies and the services composing them.
//!
//! Purpose: keep every rule about who may touch which resource, and what a
//! valid payload looks like, independent of HTTP and storage. Inbound
//! adapters call the driving ports in [`ports`]; outbound adapters implement
//! the driven ones.
//!
//! Public surface:
//! - Error (alias to `error::Error`) and ErrorCode, the failure taxonomy.
//! - ActorClaim, Role and TenantId describing the authenticated caller.
//! - AccessPolicy, the per-route role gate.
//! - TenantScope, the ownership policy for mutations.
//! - Category, Product and Topping with their draft and patch forms.
//! - CategoryService, ProductService and ToppingService.

pub mod access;
pub mod actor;
pub mod category;
pub mod category_service;
pub mod error;
pub mod image;
pub mod image_replacement;
pub mod payload;
pub mod ports;
pub mod product;
pub mod product_service;
pub mod request_context;
pub mod resource_id;
#[cfg(test)]
pub(crate) mod service_test_support;
pub mod tenancy;
pub mod topping;
pub mod topping_service;
pub mod validation;

pub use self::access::{AccessPolicy, CatalogRoute, RouteAccess};
pub use self::actor::{ActorClaim, ActorValidationError, Role, TenantId};
pub use self::category::{
    Category, CategoryAttribute, CategoryDraft, CategoryPatch, CategoryPriceOptions, PriceType,
    WidgetType,
};
pub use self::category_service::CategoryService;
pub use self::error::{Error, ErrorCode};
pub use self::image::{AssetKind, AssetName, DEFAULT_MAX_UPLOAD_BYTES, UploadedImage};
pub use self::image_replacement::{ImageReplacement, Replacement};
pub use self::payload::{MutationRequest, RawField, RequestBody};
pub use self::product::{
    AttributeValue, Product, ProductAttribute, ProductDraft, ProductPatch, ProductPriceOptions,
};
pub use self::product_service::ProductService;
pub use self::request_context::{RequestContext, TRACE_ID_HEADER, TraceId};
pub use self::resource_id::{InvalidResourceId, ResourceId};
pub use self::tenancy::{Mutation, ResourceKind, TENANT_ID_FIELD, TenantOwned, TenantScope};
pub use self::topping::{Topping, ToppingDraft, ToppingPatch};
pub use self::topping_service::ToppingService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use catalog::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
