//! Product HTTP handlers.
//!
//! ```text
//! GET    /api/v1/products
//! GET    /api/v1/products/{id}
//! POST   /api/v1/products
//! PUT    /api/v1/products/{id}
//! DELETE /api/v1/products/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use crate::domain::CatalogRoute;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{authorize, authorize_actor};
use crate::inbound::http::body::read_mutation;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{
    CreatedSchema, ErrorSchema, MessageSchema, ProductEnvelopeSchema, ProductListSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_resource_id;

const INVALID_ID: &str = "Invalid product ID";

/// List every product.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tags = ["products"],
    responses(
        (status = 200, description = "Products", body = ProductListSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    )
)]
#[get("/products")]
pub async fn list_products(req: HttpRequest, state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    authorize(&req, &state, CatalogRoute::ProductList)?;
    let products = state.products.list().await?;
    Ok(envelope::ok(products))
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tags = ["products"],
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product", body = ProductEnvelopeSchema),
        (status = 400, description = "Invalid product ID", body = ErrorSchema),
        (status = 404, description = "Product not found", body = ErrorSchema)
    )
)]
#[get("/products/{id}")]
pub async fn get_product(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    authorize(&req, &state, CatalogRoute::ProductDetail)?;
    let id = parse_resource_id(&path.into_inner(), INVALID_ID)?;
    let product = state.products.get(&id).await?;
    Ok(envelope::ok(product))
}

/// Create a product from JSON or a multipart form with an `image` file.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    tags = ["products"],
    request_body(content_type = "multipart/form-data", description = "Product fields, directly or as a JSON `data` field, plus an optional `image` file when `imageUrl` is given"),
    responses(
        (status = 201, description = "Product created", body = CreatedSchema),
        (status = 400, description = "Invalid input data", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Role not allowed", body = ErrorSchema),
        (status = 500, description = "Upload or storage failure", body = ErrorSchema)
    ),
    security(("BearerAuth" = []))
)]
#[post("/products")]
pub async fn create_product(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let actor = authorize_actor(&req, &state, CatalogRoute::ProductCreate)?;
    let request = read_mutation(&req, payload, state.max_upload_bytes).await?;
    let product = state.products.create(&actor, request).await?;
    Ok(envelope::created("Product created successfully", &product.id))
}

/// Update a product, optionally replacing its image.
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tags = ["products"],
    params(("id" = String, Path, description = "Product identifier")),
    request_body(content_type = "multipart/form-data", description = "Any product field except `tenantId`, plus an optional `image` file"),
    responses(
        (status = 200, description = "Product updated", body = ProductEnvelopeSchema),
        (status = 400, description = "Invalid input data", body = ErrorSchema),
        (status = 403, description = "Product owned by another tenant", body = ErrorSchema),
        (status = 404, description = "Product not found", body = ErrorSchema)
    ),
    security(("BearerAuth" = []))
)]
#[put("/products/{id}")]
pub async fn update_product(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let actor = authorize_actor(&req, &state, CatalogRoute::ProductUpdate)?;
    let id = parse_resource_id(&path.into_inner(), INVALID_ID)?;
    let request = read_mutation(&req, payload, state.max_upload_bytes).await?;
    let product = state.products.update(&actor, &id, request).await?;
    Ok(envelope::ok_with_message("Product updated successfully", product))
}

/// Delete a product and its image.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tags = ["products"],
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product deleted", body = MessageSchema),
        (status = 403, description = "Product owned by another tenant", body = ErrorSchema),
        (status = 404, description = "Product not found", body = ErrorSchema)
    ),
    security(("BearerAuth" = []))
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = authorize_actor(&req, &state, CatalogRoute::ProductDelete)?;
    let id = parse_resource_id(&path.into_inner(), INVALID_ID)?;
    state.products.delete(&actor, &id).await?;
    Ok(envelope::message("Product deleted successfully"))
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
