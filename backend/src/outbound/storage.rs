//! Filesystem-backed object storage for uploaded images.
//!
//! Objects live flat inside one capability-scoped directory; their public
//! URI is the configured base URL joined with the object name.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::AssetName;
use crate::domain::ports::{ObjectStorage, ObjectStorageError};

/// Stores objects as files under a single directory.
#[derive(Clone)]
pub struct FilesystemObjectStorage {
    dir: Arc<Dir>,
    public_base: String,
}

impl FilesystemObjectStorage {
    /// Open (creating when missing) `root` and serve objects under
    /// `public_base`.
    ///
    /// # Examples
    /// ```no_run
    /// use catalog::outbound::storage::FilesystemObjectStorage;
    ///
    /// let storage = FilesystemObjectStorage::open("uploads", "http://localhost:8080/uploads")
    ///     .expect("open storage");
    /// # let _ = storage;
    /// ```
    pub fn open(root: impl AsRef<Path>, public_base: impl Into<String>) -> io::Result<Self> {
        let root = root.as_ref();
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            public_base: public_base.into().trim_end_matches('/').to_owned(),
        })
    }

    /// Object name for a bare name or one of our own URIs.
    fn resolve(&self, name_or_uri: &str) -> Option<AssetName> {
        if name_or_uri.contains("://") {
            let rest = name_or_uri.strip_prefix(&self.public_base)?;
            AssetName::from_reference(rest.trim_start_matches('/'))
        } else {
            AssetName::from_reference(name_or_uri)
        }
    }
}

#[async_trait]
impl ObjectStorage for FilesystemObjectStorage {
    async fn upload(&self, name: &AssetName, bytes: &[u8]) -> Result<(), ObjectStorageError> {
        let dir = Arc::clone(&self.dir);
        let file_name = name.as_str().to_owned();
        let bytes = bytes.to_vec();
        tokio::task::spawn_blocking(move || dir.write(&file_name, bytes))
            .await
            .map_err(|err| ObjectStorageError::upload(err.to_string()))?
            .map_err(|err| ObjectStorageError::upload(err.to_string()))?;
        debug!(object = name.as_str(), "object stored");
        Ok(())
    }

    async fn delete(&self, name_or_uri: &str) -> Result<(), ObjectStorageError> {
        let name = self
            .resolve(name_or_uri)
            .ok_or_else(|| ObjectStorageError::invalid_reference(name_or_uri))?;
        let dir = Arc::clone(&self.dir);
        let file_name = name.as_str().to_owned();
        let removed = tokio::task::spawn_blocking(move || dir.remove_file(&file_name))
            .await
            .map_err(|err| ObjectStorageError::delete(err.to_string()))?;
        match removed {
            Ok(()) => {
                debug!(object = name.as_str(), "object removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(object = name.as_str(), "object already absent");
                Ok(())
            }
            Err(err) => Err(ObjectStorageError::delete(err.to_string())),
        }
    }

    fn object_uri(&self, name: &AssetName) -> String {
        format!("{}/{}", self.public_base, name.as_str())
    }
}
