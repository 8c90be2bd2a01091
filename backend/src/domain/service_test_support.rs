//! Actors and stored entities shared by the service tests.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::domain::{
    ActorClaim, Category, PriceType, Product, ProductPriceOptions, ResourceId, Role, TenantId,
    Topping, UploadedImage,
};

pub(crate) fn admin() -> ActorClaim {
    ActorClaim::new("admin-1", Role::Admin, None).expect("valid admin")
}

pub(crate) fn manager(tenant: &str) -> ActorClaim {
    ActorClaim::new("manager-1", Role::Manager, Some(tenant_id(tenant))).expect("valid manager")
}

pub(crate) fn tenant_id(raw: &str) -> TenantId {
    TenantId::new(raw).expect("valid tenant")
}

pub(crate) fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object fixture, got {other}"),
    }
}

pub(crate) fn png() -> UploadedImage {
    UploadedImage::new("image/png", vec![0x89, 0x50, 0x4e, 0x47])
}

pub(crate) fn stored_category(name: &str) -> Category {
    Category {
        id: ResourceId::generate(),
        name: name.to_owned(),
        price_configuration: BTreeMap::new(),
        attributes: Vec::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub(crate) fn stored_topping(tenant: &str, image: &str) -> Topping {
    Topping {
        id: ResourceId::generate(),
        name: "Cheese".to_owned(),
        price: 2.5,
        image: image.to_owned(),
        tenant_id: tenant_id(tenant),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub(crate) fn stored_product(tenant: &str, image_url: &str) -> Product {
    Product {
        id: ResourceId::generate(),
        name: "Margherita".to_owned(),
        description: "Tomato, mozzarella and basil".to_owned(),
        image_url: image_url.to_owned(),
        price_configuration: BTreeMap::from([(
            "Size".to_owned(),
            ProductPriceOptions {
                price_type: PriceType::Base,
                available_options: BTreeMap::from([("Small".to_owned(), 400.0)]),
            },
        )]),
        attributes: Vec::new(),
        tenant_id: tenant_id(tenant),
        category_id: ResourceId::generate(),
        is_published: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
