//! Diesel row types. Internal to the persistence adapter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use super::schema::{categories, products, toppings};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: String,
    pub name: String,
    pub price_configuration: Value,
    pub attributes: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub price_configuration: Value,
    pub attributes: Value,
}

/// `None` fields are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = categories)]
pub(crate) struct CategoryUpdate<'a> {
    pub name: Option<&'a str>,
    pub price_configuration: Option<Value>,
    pub attributes: Option<Value>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price_configuration: Value,
    pub attributes: Value,
    pub tenant_id: String,
    pub category_id: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
    pub price_configuration: Value,
    pub attributes: Value,
    pub tenant_id: &'a str,
    pub category_id: &'a str,
    pub is_published: bool,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductUpdate<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub price_configuration: Option<Value>,
    pub attributes: Option<Value>,
    pub category_id: Option<&'a str>,
    pub is_published: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = toppings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ToppingRow {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub tenant_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = toppings)]
pub(crate) struct NewToppingRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub price: f64,
    pub image: &'a str,
    pub tenant_id: &'a str,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = toppings)]
pub(crate) struct ToppingUpdate<'a> {
    pub name: Option<&'a str>,
    pub price: Option<f64>,
    pub image: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
