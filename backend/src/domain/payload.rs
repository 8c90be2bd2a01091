//! Request bodies before and after the explicit parse step.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::Error;
use super::image::UploadedImage;

const INVALID_DATA_FIELD: &str = "Invalid JSON in 'data' field";

/// Form fields whose `data` entry still holds JSON text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawField {
    /// Plain text form fields.
    pub fields: Map<String, Value>,
    /// JSON object text carried by the `data` field.
    pub data: String,
}

/// Body of a mutating request.
///
/// Multipart requests arrive as [`RequestBody::Raw`]; JSON requests and
/// multipart requests without a `data` field arrive already parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Raw(RawField),
    Parsed(Map<String, Value>),
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::Parsed(Map::new())
    }
}

impl RequestBody {
    /// Produce the payload object, merging parsed `data` over form fields.
    ///
    /// # Examples
    /// ```
    /// use catalog::domain::{RawField, RequestBody};
    /// use serde_json::{json, Map};
    ///
    /// let mut fields = Map::new();
    /// fields.insert("name".into(), json!("Cheese"));
    /// let body = RequestBody::Raw(RawField { fields, data: r#"{"price": 2.5}"#.into() });
    /// let payload = body.into_payload().expect("valid JSON");
    /// assert_eq!(payload.get("name"), Some(&json!("Cheese")));
    /// assert_eq!(payload.get("price"), Some(&json!(2.5)));
    ///
    /// let broken = RequestBody::Raw(RawField { fields: Map::new(), data: "{".into() });
    /// assert!(broken.into_payload().is_err());
    /// ```
    pub fn into_payload(self) -> Result<Map<String, Value>, Error> {
        match self {
            Self::Parsed(payload) => Ok(payload),
            Self::Raw(RawField { mut fields, data }) => {
                let parsed: Value = serde_json::from_str(&data)
                    .map_err(|_| Error::invalid_request(INVALID_DATA_FIELD))?;
                let Value::Object(parsed) = parsed else {
                    return Err(Error::invalid_request(INVALID_DATA_FIELD));
                };
                fields.extend(parsed);
                Ok(fields)
            }
        }
    }
}

/// Body plus optional image file of a create or update request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationRequest {
    pub body: RequestBody,
    pub image: Option<UploadedImage>,
}

impl MutationRequest {
    /// Request without an image file.
    #[must_use]
    pub fn json(payload: Map<String, Value>) -> Self {
        Self {
            body: RequestBody::Parsed(payload),
            image: None,
        }
    }

    /// Attach an image file.
    #[must_use]
    pub fn with_image(mut self, image: UploadedImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// Decode a validated payload into its typed form.
pub(crate) fn decode_payload<T: DeserializeOwned>(payload: Map<String, Value>) -> Result<T, Error> {
    serde_json::from_value(Value::Object(payload))
        .map_err(|error| Error::invalid_request(format!("Invalid payload: {error}")))
}

/// Wrap a JSON value as a parsed body; non-objects are rejected.
impl TryFrom<Value> for RequestBody {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::Parsed(map)),
            Value::Null => Ok(Self::default()),
            _ => Err(Error::invalid_request("Request body must be a JSON object")),
        }
    }
}
