//! Upload-then-delete handling of resource images.
//!
//! A create stores its image or fails. An update makes one upload attempt:
//! on success the new URI replaces the reference and the previous asset is
//! removed once the record is written; on failure the previous reference is
//! kept and the update carries on without it. Removing an asset never fails
//! a request.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::error::Error;
use super::image::{AssetKind, AssetName, UploadedImage};
use super::ports::ObjectStorage;

const UPLOAD_FAILED: &str = "Error uploading file to storage";

/// Where an update's image reference ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// The request carried no file.
    NoImage,
    /// The new asset is stored; `previous` is removed after the write.
    Uploaded { uri: String, previous: String },
    /// The upload failed; the previous reference stays.
    Retained,
}

impl Replacement {
    /// Reference to persist, if it changes.
    #[must_use]
    pub fn new_reference(&self) -> Option<&str> {
        match self {
            Self::Uploaded { uri, .. } => Some(uri.as_str()),
            Self::NoImage | Self::Retained => None,
        }
    }
}

/// Image lifecycle for one resource type.
#[derive(Clone)]
pub struct ImageReplacement {
    storage: Arc<dyn ObjectStorage>,
    kind: AssetKind,
}

impl ImageReplacement {
    pub fn new(storage: Arc<dyn ObjectStorage>, kind: AssetKind) -> Self {
        Self { storage, kind }
    }

    /// Store the image of a new resource and return its public URI.
    ///
    /// # Errors
    /// Returns `InternalError` when the upload fails.
    pub async fn store(&self, image: &UploadedImage) -> Result<String, Error> {
        let name = AssetName::generate(self.kind, image);
        self.storage
            .upload(&name, image.bytes())
            .await
            .map_err(|err| {
                error!(asset = %name, error = %err, "image upload failed");
                Error::internal(UPLOAD_FAILED)
            })?;
        info!(asset = %name, "image stored");
        Ok(self.storage.object_uri(&name))
    }

    /// Attempt to replace `current` with `image`.
    pub async fn begin(&self, current: &str, image: Option<&UploadedImage>) -> Replacement {
        let Some(image) = image else {
            return Replacement::NoImage;
        };
        let name = AssetName::generate(self.kind, image);
        match self.storage.upload(&name, image.bytes()).await {
            Ok(()) => {
                info!(asset = %name, "replacement image stored");
                Replacement::Uploaded {
                    uri: self.storage.object_uri(&name),
                    previous: current.to_owned(),
                }
            }
            Err(err) => {
                error!(asset = %name, error = %err, "replacement upload failed, keeping previous image");
                Replacement::Retained
            }
        }
    }

    /// Remove the superseded asset once the new reference is persisted.
    pub async fn finish(&self, replacement: Replacement) {
        if let Replacement::Uploaded { previous, .. } = replacement {
            self.discard(&previous).await;
        }
    }

    /// Remove the new asset of a replacement whose write failed.
    pub async fn abandon(&self, replacement: Replacement) {
        if let Replacement::Uploaded { uri, .. } = replacement {
            self.discard(&uri).await;
        }
    }

    /// Best-effort removal of a stored asset.
    pub async fn discard(&self, uri: &str) {
        if uri.is_empty() {
            return;
        }
        match self.storage.delete(uri).await {
            Ok(()) => info!(uri, "image deleted from storage"),
            Err(err) => warn!(uri, error = %err, "failed to delete image"),
        }
    }
}
