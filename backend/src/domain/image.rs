//! Uploaded image files and the opaque names they are stored under.

use std::fmt;

use uuid::Uuid;

/// Default upload limit: 2 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Image file received with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    content_type: String,
    bytes: Vec<u8>,
}

impl UploadedImage {
    /// Wrap an uploaded file and its declared MIME type.
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Declared MIME type, for example `image/png`.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.content_type.as_str()
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension derived from the MIME subtype.
    #[must_use]
    pub fn extension(&self) -> &str {
        self.content_type
            .split_once('/')
            .map_or(self.content_type.as_str(), |(_, subtype)| subtype)
    }
}

/// Naming scheme applied when generating asset names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// `<uuid>.<ext>`
    Product,
    /// `<uuid>-t.<ext>`
    Topping,
}

/// Server-generated name of a stored asset.
///
/// Never derived from client-supplied file names.
///
/// # Examples
/// ```
/// use catalog::domain::{AssetKind, AssetName, UploadedImage};
///
/// let image = UploadedImage::new("image/webp", vec![1, 2, 3]);
/// let name = AssetName::generate(AssetKind::Topping, &image);
/// assert!(name.as_str().ends_with("-t.webp"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetName(String);

impl AssetName {
    /// Generate a unique name for `image`.
    #[must_use]
    pub fn generate(kind: AssetKind, image: &UploadedImage) -> Self {
        let suffix = match kind {
            AssetKind::Product => "",
            AssetKind::Topping => "-t",
        };
        Self(format!("{}{suffix}.{}", Uuid::new_v4(), image.extension()))
    }

    /// Rebuild a name from a stored object reference: a bare name or a URI
    /// whose last path segment is the name.
    #[must_use]
    pub fn from_reference(reference: &str) -> Option<Self> {
        let trimmed = reference.trim_end_matches('/');
        let name = if trimmed.contains("://") {
            trimmed.rsplit('/').next()
        } else {
            Some(trimmed)
        };
        name.filter(|name| !name.is_empty() && !name.contains(['/', '\\']) && *name != "..")
            .map(|name| Self(name.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
