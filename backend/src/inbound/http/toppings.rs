//! Topping HTTP handlers.
//!
//! ```text
//! GET    /api/v1/toppings
//! GET    /api/v1/toppings/{id}
//! POST   /api/v1/toppings
//! PUT    /api/v1/toppings/{id}
//! DELETE /api/v1/toppings/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use crate::domain::CatalogRoute;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{authorize, authorize_actor};
use crate::inbound::http::body::read_mutation;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{
    CreatedSchema, ErrorSchema, MessageSchema, ToppingEnvelopeSchema, ToppingListSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_resource_id;

const INVALID_ID: &str = "Invalid topping ID";

/// List every topping.
#[utoipa::path(
    get,
    path = "/api/v1/toppings",
    tags = ["toppings"],
    responses(
        (status = 200, description = "Toppings", body = ToppingListSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    )
)]
#[get("/toppings")]
pub async fn list_toppings(req: HttpRequest, state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    authorize(&req, &state, CatalogRoute::ToppingList)?;
    let toppings = state.toppings.list().await?;
    Ok(envelope::ok(toppings))
}

/// Fetch one topping.
#[utoipa::path(
    get,
    path = "/api/v1/toppings/{id}",
    tags = ["toppings"],
    params(("id" = String, Path, description = "Topping identifier")),
    responses(
        (status = 200, description = "Topping", body = ToppingEnvelopeSchema),
        (status = 400, description = "Invalid topping ID", body = ErrorSchema),
        (status = 404, description = "Topping not found", body = ErrorSchema)
    )
)]
#[get("/toppings/{id}")]
pub async fn get_topping(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    authorize(&req, &state, CatalogRoute::ToppingDetail)?;
    let id = parse_resource_id(&path.into_inner(), INVALID_ID)?;
    let topping = state.toppings.get(&id).await?;
    Ok(envelope::ok(topping))
}

/// Create a topping from a multipart form carrying its image.
///
/// Managers always create in their own tenant.
#[utoipa::path(
    post,
    path = "/api/v1/toppings",
    tags = ["toppings"],
    request_body(content_type = "multipart/form-data", description = "`name`, `price`, `tenantId` or a JSON `data` field, plus an `image` file"),
    responses(
        (status = 201, description = "Topping created", body = CreatedSchema),
        (status = 400, description = "Invalid input data", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Role not allowed", body = ErrorSchema),
        (status = 500, description = "Upload or storage failure", body = ErrorSchema)
    ),
    security(("BearerAuth" = []))
)]
#[post("/toppings")]
pub async fn create_topping(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let actor = authorize_actor(&req, &state, CatalogRoute::ToppingCreate)?;
    let request = read_mutation(&req, payload, state.max_upload_bytes).await?;
    let topping = state.toppings.create(&actor, request).await?;
    Ok(envelope::created("Topping created successfully", &topping.id))
}

/// Update a topping, optionally replacing its image.
#[utoipa::path(
    put,
    path = "/api/v1/toppings/{id}",
    tags = ["toppings"],
    params(("id" = String, Path, description = "Topping identifier")),
    request_body(content_type = "multipart/form-data", description = "Any of `name`, `price`, `image`"),
    responses(
        (status = 200, description = "Topping updated", body = ToppingEnvelopeSchema),
        (status = 400, description = "Invalid input data", body = ErrorSchema),
        (status = 403, description = "Topping owned by another tenant", body = ErrorSchema),
        (status = 404, description = "Topping not found", body = ErrorSchema)
    ),
    security(("BearerAuth" = []))
)]
#[put("/toppings/{id}")]
pub async fn update_topping(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let actor = authorize_actor(&req, &state, CatalogRoute::ToppingUpdate)?;
    let id = parse_resource_id(&path.into_inner(), INVALID_ID)?;
    let request = read_mutation(&req, payload, state.max_upload_bytes).await?;
    let topping = state.toppings.update(&actor, &id, request).await?;
    Ok(envelope::ok_with_message("Topping updated successfully", topping))
}

/// Delete a topping and its image.
#[utoipa::path(
    delete,
    path = "/api/v1/toppings/{id}",
    tags = ["toppings"],
    params(("id" = String, Path, description = "Topping identifier")),
    responses(
        (status = 200, description = "Topping deleted", body = MessageSchema),
        (status = 403, description = "Topping owned by another tenant", body = ErrorSchema),
        (status = 404, description = "Topping not found", body = ErrorSchema)
    ),
    security(("BearerAuth" = []))
)]
#[delete("/toppings/{id}")]
pub async fn delete_topping(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = authorize_actor(&req, &state, CatalogRoute::ToppingDelete)?;
    let id = parse_resource_id(&path.into_inner(), INVALID_ID)?;
    state.toppings.delete(&actor, &id).await?;
    Ok(envelope::message("Topping deleted successfully"))
}

#[cfg(test)]
#[path = "toppings_tests.rs"]
mod tests;
