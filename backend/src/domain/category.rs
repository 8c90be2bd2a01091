//! Category entities.
//!
//! Categories are shared by every tenant and define the price options and
//! attributes products in them may carry.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::resource_id::ResourceId;

/// How an option contributes to the final price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Base,
    Additional,
    /// Only meaningful on categories.
    Discount,
}

/// How an attribute is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    Radio,
    Switch,
}

/// Price options a category offers under one key (for example `Size`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPriceOptions {
    pub price_type: PriceType,
    pub available_options: Vec<String>,
}

/// Attribute definition offered by a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAttribute {
    pub name: String,
    pub widget_type: WidgetType,
    /// Always one of `available_options`.
    pub default_value: String,
    pub available_options: Vec<String>,
}

/// Stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: ResourceId,
    pub name: String,
    pub price_configuration: BTreeMap<String, CategoryPriceOptions>,
    pub attributes: Vec<CategoryAttribute>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    pub price_configuration: BTreeMap<String, CategoryPriceOptions>,
    pub attributes: Vec<CategoryAttribute>,
}

/// Validated update payload; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub price_configuration: Option<BTreeMap<String, CategoryPriceOptions>>,
    pub attributes: Option<Vec<CategoryAttribute>>,
}

impl CategoryPatch {
    /// Apply the patch to a stored category.
    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name.clone_from(name);
        }
        if let Some(price_configuration) = &self.price_configuration {
            category.price_configuration.clone_from(price_configuration);
        }
        if let Some(attributes) = &self.attributes {
            category.attributes.clone_from(attributes);
        }
    }
}
