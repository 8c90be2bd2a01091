//! Port for the object store holding uploaded images.
use async_trait::async_trait;

use crate::domain::AssetName;

use super::define_port_error;

define_port_error! {
    /// Errors raised by object storage adapters.
    pub enum ObjectStorageError {
        /// The object could not be written.
        Upload { message: String } => "object upload failed: {message}",
        /// The object could not be removed.
        Delete { message: String } => "object delete failed: {message}",
        /// The reference does not name an object.
        InvalidReference { reference: String } => "not an object reference: {reference}",
    }
}

/// Opaque upload/delete/URI capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `name`.
    async fn upload(&self, name: &AssetName, bytes: &[u8]) -> Result<(), ObjectStorageError>;

    /// Remove an object by bare name or by its public URI.
    async fn delete(&self, name_or_uri: &str) -> Result<(), ObjectStorageError>;

    /// Public URI of the object stored under `name`.
    fn object_uri(&self, name: &AssetName) -> String;
}
