//! Product entities.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::actor::TenantId;
use super::category::PriceType;
use super::resource_id::ResourceId;
use super::tenancy::TenantOwned;

/// Priced options under one key, for example `{"Small": 400, "Large": 650}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPriceOptions {
    pub price_type: PriceType,
    pub available_options: BTreeMap<String, f64>,
}

/// Scalar attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

/// Attribute chosen for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductAttribute {
    pub name: String,
    pub value: AttributeValue,
}

/// Stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ResourceId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price_configuration: BTreeMap<String, ProductPriceOptions>,
    pub attributes: Vec<ProductAttribute>,
    pub tenant_id: TenantId,
    pub category_id: ResourceId,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantOwned for Product {
    fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }
}

/// Validated create payload.
///
/// `image_url` is empty until the uploaded image, if any, has been stored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub price_configuration: BTreeMap<String, ProductPriceOptions>,
    pub attributes: Vec<ProductAttribute>,
    pub tenant_id: TenantId,
    pub category_id: ResourceId,
    #[serde(default)]
    pub is_published: bool,
}

/// Validated update payload; absent fields keep their stored value.
///
/// The owning tenant is immutable and never part of a patch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price_configuration: Option<BTreeMap<String, ProductPriceOptions>>,
    pub attributes: Option<Vec<ProductAttribute>>,
    pub category_id: Option<ResourceId>,
    pub is_published: Option<bool>,
}

impl ProductPatch {
    /// Apply the patch to a stored product.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            product.description.clone_from(description);
        }
        if let Some(image_url) = &self.image_url {
            product.image_url.clone_from(image_url);
        }
        if let Some(price_configuration) = &self.price_configuration {
            product.price_configuration.clone_from(price_configuration);
        }
        if let Some(attributes) = &self.attributes {
            product.attributes.clone_from(attributes);
        }
        if let Some(category_id) = &self.category_id {
            product.category_id.clone_from(category_id);
        }
        if let Some(is_published) = self.is_published {
            product.is_published = is_published;
        }
    }
}
