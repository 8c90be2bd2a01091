//! HTTP inbound adapter exposing the catalog REST endpoints.

pub mod auth;
pub mod body;
pub mod categories;
pub mod envelope;
pub mod error;
pub mod health;
pub mod products;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod toppings;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every catalog handler on `cfg`.
///
/// Mount under `/api/v1`; health probes are registered separately.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(categories::list_categories)
        .service(categories::get_category)
        .service(categories::create_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(products::list_products)
        .service(products::get_product)
        .service(products::create_product)
        .service(products::update_product)
        .service(products::delete_product)
        .service(toppings::list_toppings)
        .service(toppings::get_topping)
        .service(toppings::create_topping)
        .service(toppings::update_topping)
        .service(toppings::delete_topping);
}
