//! Topping entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::actor::TenantId;
use super::resource_id::ResourceId;
use super::tenancy::TenantOwned;

/// Stored topping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Topping {
    pub id: ResourceId,
    pub name: String,
    pub price: f64,
    /// Public URI of the topping image.
    pub image: String,
    pub tenant_id: TenantId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantOwned for Topping {
    fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }
}

/// Validated create payload; `image` is filled once the upload is stored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToppingDraft {
    pub name: String,
    pub price: f64,
    pub tenant_id: TenantId,
    #[serde(skip)]
    pub image: String,
}

/// Validated update payload.
///
/// The image only changes through an upload, never from payload text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToppingPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    #[serde(skip)]
    pub image: Option<String>,
}

impl ToppingPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.image.is_none()
    }

    /// Apply the patch to a stored topping.
    pub fn apply_to(&self, topping: &mut Topping) {
        if let Some(name) = &self.name {
            topping.name.clone_from(name);
        }
        if let Some(price) = self.price {
            topping.price = price;
        }
        if let Some(image) = &self.image {
            topping.image.clone_from(image);
        }
    }
}
