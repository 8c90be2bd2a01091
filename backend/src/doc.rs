//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every catalog handler, the health probes, the
//! response envelopes from [`crate::inbound::http::schemas`], and the bearer
//! token security scheme. Swagger UI serves it in debug builds.

use crate::domain::{
    Category, CategoryAttribute, CategoryPriceOptions, ErrorCode, PriceType, Product,
    ProductAttribute, ProductPriceOptions, ResourceId, Role, TenantId, Topping, WidgetType,
};
use crate::inbound::http::schemas::{
    CategoryEnvelopeSchema, CategoryListSchema, CreatedIdSchema, CreatedSchema, ErrorItemSchema,
    ErrorSchema, MessageSchema, ProductEnvelopeSchema, ProductListSchema, ToppingEnvelopeSchema,
    ToppingListSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the bearer token scheme referenced by mutating routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Access token from the identity service. The `accessToken` cookie is accepted as a fallback.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the catalog API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Catalog API",
        description = "Multi-tenant catalog of categories, products and toppings.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::toppings::list_toppings,
        crate::inbound::http::toppings::get_topping,
        crate::inbound::http::toppings::create_topping,
        crate::inbound::http::toppings::update_topping,
        crate::inbound::http::toppings::delete_topping,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Category,
        CategoryAttribute,
        CategoryPriceOptions,
        PriceType,
        WidgetType,
        Product,
        ProductAttribute,
        ProductPriceOptions,
        Topping,
        ResourceId,
        TenantId,
        Role,
        ErrorCode,
        ErrorItemSchema,
        ErrorSchema,
        CreatedIdSchema,
        CreatedSchema,
        MessageSchema,
        CategoryEnvelopeSchema,
        CategoryListSchema,
        ProductEnvelopeSchema,
        ProductListSchema,
        ToppingEnvelopeSchema,
        ToppingListSchema,
    )),
    tags(
        (name = "categories", description = "Category definitions shared by every tenant"),
        (name = "products", description = "Tenant-owned products"),
        (name = "toppings", description = "Tenant-owned toppings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
