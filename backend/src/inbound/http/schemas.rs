//! OpenAPI schema definitions for the HTTP envelopes.
//!
//! The envelopes are serialised from borrowed, generic types at runtime.
//! These wrappers mirror their structure so the document can name them.

use utoipa::ToSchema;

use crate::domain::{Category, Product, Topping};

/// One entry of an error envelope's `errors` list.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorItemSchema {
    /// `field` for validation failures, otherwise the error kind name.
    #[schema(rename = "type", example = "field")]
    kind: String,
    #[schema(example = "Name must be a string")]
    message: String,
    /// Failing field, or the request path for non-validation errors.
    #[schema(example = "name")]
    path: String,
}

/// Failure envelope returned by every endpoint.
#[derive(ToSchema)]
#[schema(as = ErrorResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = false)]
    success: bool,
    #[schema(example = "Invalid input data")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    errors: Vec<ErrorItemSchema>,
}

/// Identifier of a created resource.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreatedIdSchema {
    #[schema(example = "65f1c2a4b9e8d70012345678")]
    id: String,
}

/// Envelope returned by create endpoints.
#[derive(ToSchema)]
#[schema(as = CreatedResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreatedSchema {
    success: bool,
    #[schema(example = "Topping created successfully")]
    message: String,
    data: CreatedIdSchema,
}

/// Envelope returned by delete endpoints.
#[derive(ToSchema)]
#[schema(as = MessageResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MessageSchema {
    success: bool,
    #[schema(example = "Topping deleted successfully")]
    message: String,
}

macro_rules! data_envelope_schema {
    ($name:ident, $alias:ident, $data:ty) => {
        #[derive(ToSchema)]
        #[schema(as = $alias)]
        #[expect(
            dead_code,
            reason = "Used only for OpenAPI schema generation via utoipa"
        )]
        pub struct $name {
            success: bool,
            message: Option<String>,
            data: $data,
        }
    };
}

data_envelope_schema!(CategoryEnvelopeSchema, CategoryResponse, Category);
data_envelope_schema!(CategoryListSchema, CategoryListResponse, Vec<Category>);
data_envelope_schema!(ProductEnvelopeSchema, ProductResponse, Product);
data_envelope_schema!(ProductListSchema, ProductListResponse, Vec<Product>);
data_envelope_schema!(ToppingEnvelopeSchema, ToppingResponse, Topping);
data_envelope_schema!(ToppingListSchema, ToppingListResponse, Vec<Topping>);
