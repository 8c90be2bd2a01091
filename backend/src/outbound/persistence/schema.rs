//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Category definitions shared by every tenant.
    categories (id) {
        /// 24-hex object identifier.
        id -> Bpchar,
        /// Unique display name.
        name -> Text,
        /// Price option groups keyed by group name.
        price_configuration -> Jsonb,
        /// Attribute definitions.
        attributes -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tenant-owned products.
    products (id) {
        id -> Bpchar,
        name -> Text,
        description -> Text,
        /// Public URI of the product image.
        image_url -> Text,
        price_configuration -> Jsonb,
        attributes -> Jsonb,
        tenant_id -> Text,
        category_id -> Bpchar,
        is_published -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tenant-owned toppings.
    toppings (id) {
        id -> Bpchar,
        name -> Text,
        price -> Float8,
        /// Public URI of the topping image.
        image -> Text,
        tenant_id -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(categories, products, toppings);
