//! Object identifiers shared by every catalog resource.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const RESOURCE_ID_BYTES: usize = 12;
const RESOURCE_ID_LEN: usize = RESOURCE_ID_BYTES * 2;

/// Raised when text is not a 24-character hexadecimal identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be {RESOURCE_ID_LEN} hexadecimal characters")]
pub struct InvalidResourceId;

/// 24-hex-character object identifier used by persistence.
///
/// Parsing normalises to lowercase.
///
/// # Examples
/// ```
/// use catalog::domain::ResourceId;
///
/// let id = ResourceId::parse("65F1C2A4B9E8D70012345678").expect("valid id");
/// assert_eq!(id.as_str(), "65f1c2a4b9e8d70012345678");
/// assert!(ResourceId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "65f1c2a4b9e8d70012345678")]
pub struct ResourceId(String);

impl ResourceId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; RESOURCE_ID_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Parse and normalise an identifier.
    pub fn parse(raw: &str) -> Result<Self, InvalidResourceId> {
        if Self::is_valid(raw) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(InvalidResourceId)
        }
    }

    /// Whether `raw` is a syntactically valid identifier.
    #[must_use]
    pub fn is_valid(raw: &str) -> bool {
        raw.len() == RESOURCE_ID_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = InvalidResourceId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ResourceId> for String {
    fn from(value: ResourceId) -> Self {
        value.0
    }
}
