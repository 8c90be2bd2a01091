//! Category HTTP handlers.
//!
//! ```text
//! GET    /api/v1/categories
//! GET    /api/v1/categories/{id}
//! POST   /api/v1/categories
//! PATCH  /api/v1/categories/{id}
//! DELETE /api/v1/categories/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};

use crate::domain::CatalogRoute;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{authorize, authorize_actor};
use crate::inbound::http::body::read_mutation;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{
    CategoryEnvelopeSchema, CategoryListSchema, CreatedSchema, ErrorSchema, MessageSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_resource_id;

const INVALID_ID: &str = "Invalid category ID";

/// List every category.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tags = ["categories"],
    responses(
        (status = 200, description = "Categories", body = CategoryListSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Role not allowed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    security(("BearerAuth" = []))
)]
#[get("/categories")]
pub async fn list_categories(req: HttpRequest, state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    authorize(&req, &state, CatalogRoute::CategoryList)?;
    let categories = state.categories.list().await?;
    Ok(envelope::ok(categories))
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tags = ["categories"],
    params(("id" = String, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category", body = CategoryEnvelopeSchema),
        (status = 400, description = "Invalid category ID", body = ErrorSchema),
        (status = 404, description = "Category not found", body = ErrorSchema)
    ),
    security(("BearerAuth" = []))
)]
#[get("/categories/{id}")]
pub async fn get_category(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    authorize(&req, &state, CatalogRoute::CategoryDetail)?;
    let id = parse_resource_id(&path.into_inner(), INVALID_ID)?;
    let category = state.categories.get(&id).await?;
    Ok(envelope::ok(category))
}

/// Create a category. Names are unique.
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tags = ["categories"],
    request_body(content_type = "application/json", description = "`name`, `priceConfiguration` and `attributes`"),
    responses(
        (status = 201, description = "Category created", body = CreatedSchema),
        (status = 400, description = "Invalid input data", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Role not allowed", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    security(("BearerAuth" = []))
)]
#[post("/categories")]
pub async fn create_category(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let actor = authorize_actor(&req, &state, CatalogRoute::CategoryCreate)?;
    let request = read_mutation(&req, payload, state.max_upload_bytes).await?;
    let category = state.categories.create(&actor, request).await?;
    Ok(envelope::created("Category created successfully", &category.id))
}

/// Update any subset of a category's fields.
#[utoipa::path(
    patch,
    path = "/api/v1/categories/{id}",
    tags = ["categories"],
    params(("id" = String, Path, description = "Category identifier")),
    request_body(content_type = "application/json", description = "Any of `name`, `priceConfiguration`, `attributes`"),
    responses(
        (status = 200, description = "Category updated", body = CategoryEnvelopeSchema),
        (status = 400, description = "Invalid input data", body = ErrorSchema),
        (status = 403, description = "Role not allowed", body = ErrorSchema),
        (status = 404, description = "Category not found", body = ErrorSchema)
    ),
    security(("BearerAuth" = []))
)]
#[patch("/categories/{id}")]
pub async fn update_category(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let actor = authorize_actor(&req, &state, CatalogRoute::CategoryUpdate)?;
    let id = parse_resource_id(&path.into_inner(), INVALID_ID)?;
    let request = read_mutation(&req, payload, state.max_upload_bytes).await?;
    let category = state.categories.update(&actor, &id, request).await?;
    Ok(envelope::ok_with_message("Category updated successfully", category))
}

/// Delete a category.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tags = ["categories"],
    params(("id" = String, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category deleted", body = MessageSchema),
        (status = 403, description = "Role not allowed", body = ErrorSchema),
        (status = 404, description = "Category not found", body = ErrorSchema)
    ),
    security(("BearerAuth" = []))
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = authorize_actor(&req, &state, CatalogRoute::CategoryDelete)?;
    let id = parse_resource_id(&path.into_inner(), INVALID_ID)?;
    state.categories.delete(&actor, &id).await?;
    Ok(envelope::message("Category deleted successfully"))
}

#[cfg(test)]
#[path = "categories_tests.rs"]
mod tests;
