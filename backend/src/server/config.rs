//! Catalog settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CATALOG_*` environment variables and an
//! optional configuration file, in the usual OrthoConfig precedence.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use catalog::domain::{
    AccessPolicy, ActorValidationError, CatalogRoute, DEFAULT_MAX_UPLOAD_BYTES, RouteAccess,
};
use catalog::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STORAGE_DIR: &str = "uploads";
const DEFAULT_STORAGE_PUBLIC_URL: &str = "http://localhost:8080/uploads";

/// Startup configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid {setting}: {source}")]
    RouteAccess {
        setting: &'static str,
        source: ActorValidationError,
    },
    #[error("either jwt_secret or jwt_public_key_path must be configured")]
    MissingJwtKey,
}

/// Configuration values for the catalog service.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct CatalogSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory repositories are used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Idle connections the pool keeps open.
    pub db_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
    /// Directory holding uploaded images.
    pub storage_dir: Option<PathBuf>,
    /// Public URL under which stored images are served.
    pub storage_public_url: Option<String>,
    /// Shared HS256 secret for access tokens.
    pub jwt_secret: Option<String>,
    /// RS256 public key (PEM) for access tokens.
    pub jwt_public_key_path: Option<PathBuf>,
    /// Required `iss` claim, if any.
    pub jwt_issuer: Option<String>,
    /// Largest accepted image upload in bytes.
    pub max_upload_bytes: Option<usize>,
    pub category_read_roles: Option<String>,
    pub category_write_roles: Option<String>,
    pub product_read_roles: Option<String>,
    pub product_create_roles: Option<String>,
    pub product_write_roles: Option<String>,
    pub topping_read_roles: Option<String>,
    pub topping_write_roles: Option<String>,
}

impl fmt::Debug for CatalogSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("storage_dir", &self.storage_dir)
            .field("storage_public_url", &self.storage_public_url)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("jwt_public_key_path", &self.jwt_public_key_path)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish_non_exhaustive()
    }
}

/// Where access tokens are verified against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JwtKeySource {
    Secret(String),
    PublicKeyFile(PathBuf),
}

impl CatalogSettings {
    /// Listening address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.trim().parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())?;
        let mut config = PoolConfig::new(url).with_min_idle(self.db_min_idle);
        if let Some(max_size) = self.db_max_connections {
            config = config.with_max_size(max_size);
        }
        if let Some(secs) = self.db_connect_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        Some(config)
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
    }

    pub fn storage_public_url(&self) -> &str {
        self.storage_public_url
            .as_deref()
            .unwrap_or(DEFAULT_STORAGE_PUBLIC_URL)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    /// The token key; a public key file wins over a shared secret.
    pub fn jwt_key(&self) -> Result<JwtKeySource, SettingsError> {
        if let Some(path) = &self.jwt_public_key_path {
            return Ok(JwtKeySource::PublicKeyFile(path.clone()));
        }
        self.jwt_secret
            .as_ref()
            .filter(|secret| !secret.is_empty())
            .map(|secret| JwtKeySource::Secret(secret.clone()))
            .ok_or(SettingsError::MissingJwtKey)
    }

    /// The default allow-lists with any configured overrides applied.
    pub fn access_policy(&self) -> Result<AccessPolicy, SettingsError> {
        use CatalogRoute as R;

        let overrides: [(&'static str, &Option<String>, &[CatalogRoute]); 7] = [
            (
                "category_read_roles",
                &self.category_read_roles,
                &[R::CategoryList, R::CategoryDetail],
            ),
            (
                "category_write_roles",
                &self.category_write_roles,
                &[R::CategoryCreate, R::CategoryUpdate, R::CategoryDelete],
            ),
            (
                "product_read_roles",
                &self.product_read_roles,
                &[R::ProductList, R::ProductDetail],
            ),
            (
                "product_create_roles",
                &self.product_create_roles,
                &[R::ProductCreate],
            ),
            (
                "product_write_roles",
                &self.product_write_roles,
                &[R::ProductUpdate, R::ProductDelete],
            ),
            (
                "topping_read_roles",
                &self.topping_read_roles,
                &[R::ToppingList, R::ToppingDetail],
            ),
            (
                "topping_write_roles",
                &self.topping_write_roles,
                &[R::ToppingCreate, R::ToppingUpdate, R::ToppingDelete],
            ),
        ];

        overrides
            .into_iter()
            .try_fold(AccessPolicy::default(), |policy, (setting, value, routes)| {
                let Some(value) = value else {
                    return Ok(policy);
                };
                let access = value
                    .parse::<RouteAccess>()
                    .map_err(|source| SettingsError::RouteAccess { setting, source })?;
                Ok(policy.with_routes(routes.iter().copied(), &access))
            })
    }
}
