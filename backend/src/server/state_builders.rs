//! Builders for HTTP state: repositories, storage, services and the gate.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use actix_web::web;
use cap_std::{ambient_authority, fs::Dir};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;
use zeroize::Zeroizing;

use catalog::domain::ports::{
    CategoryRepository, ClaimVerifier, ObjectStorage, ProductRepository, ToppingRepository,
};
use catalog::domain::{CategoryService, ProductService, ToppingService};
use catalog::inbound::http::state::{HttpState, HttpStatePorts};
use catalog::outbound::auth::JwtClaimVerifier;
use catalog::outbound::memory::{
    MemoryCategoryRepository, MemoryProductRepository, MemoryToppingRepository,
};
use catalog::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselProductRepository, DieselToppingRepository,
};
use catalog::outbound::storage::FilesystemObjectStorage;

use super::config::{CatalogSettings, JwtKeySource};

/// Compose the three resource services over one set of repositories.
fn build_catalogs<C, P, T>(
    categories: Arc<C>,
    products: Arc<P>,
    toppings: Arc<T>,
    storage: Arc<dyn ObjectStorage>,
    max_upload_bytes: usize,
) -> HttpStatePorts
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    T: ToppingRepository + 'static,
{
    HttpStatePorts {
        categories: Arc::new(CategoryService::new(categories)),
        products: Arc::new(
            ProductService::new(products, Arc::clone(&storage))
                .with_max_upload_bytes(max_upload_bytes),
        ),
        toppings: Arc::new(
            ToppingService::new(toppings, storage).with_max_upload_bytes(max_upload_bytes),
        ),
    }
}

fn build_ports(
    pool: Option<DbPool>,
    storage: Arc<dyn ObjectStorage>,
    max_upload_bytes: usize,
) -> HttpStatePorts {
    match pool {
        Some(pool) => build_catalogs(
            Arc::new(DieselCategoryRepository::new(pool.clone())),
            Arc::new(DieselProductRepository::new(pool.clone())),
            Arc::new(DieselToppingRepository::new(pool)),
            storage,
            max_upload_bytes,
        ),
        None => {
            info!("no database configured; using in-memory repositories");
            build_catalogs(
                Arc::new(MemoryCategoryRepository::default()),
                Arc::new(MemoryProductRepository::default()),
                Arc::new(MemoryToppingRepository::default()),
                storage,
                max_upload_bytes,
            )
        }
    }
}

fn read_key_file(path: &Path) -> Result<Vec<u8>> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("jwt public key path must name a file"))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())
        .wrap_err_with(|| format!("open key directory '{}'", parent.display()))?;
    let mut file = directory
        .open(Path::new(file_name))
        .wrap_err_with(|| format!("open key file '{}'", path.display()))?;
    let mut pem = Vec::new();
    file.read_to_end(&mut pem)
        .wrap_err_with(|| format!("read key file '{}'", path.display()))?;
    Ok(pem)
}

/// Token verifier for the configured key.
pub(super) fn build_claim_verifier(settings: &CatalogSettings) -> Result<Arc<dyn ClaimVerifier>> {
    let verifier = match settings.jwt_key()? {
        JwtKeySource::Secret(secret) => {
            let secret = Zeroizing::new(secret.into_bytes());
            JwtClaimVerifier::hs256(&secret)
        }
        JwtKeySource::PublicKeyFile(path) => {
            let pem = read_key_file(&path)?;
            JwtClaimVerifier::rs256_pem(&pem).wrap_err("load jwt public key")?
        }
    };
    let verifier = match settings.jwt_issuer.as_deref() {
        Some(issuer) if !issuer.trim().is_empty() => verifier.with_issuer(issuer.trim()),
        _ => verifier,
    };
    Ok(Arc::new(verifier))
}

/// Build the shared HTTP state from settings and an optional pool.
pub(super) fn build_http_state(
    settings: &CatalogSettings,
    pool: Option<DbPool>,
) -> Result<web::Data<HttpState>> {
    let storage_dir = settings.storage_dir();
    let storage = FilesystemObjectStorage::open(&storage_dir, settings.storage_public_url())
        .wrap_err_with(|| format!("open storage directory '{}'", storage_dir.display()))?;
    let max_upload_bytes = settings.max_upload_bytes();
    let ports = build_ports(pool, Arc::new(storage), max_upload_bytes);
    let state = HttpState::new(ports, build_claim_verifier(settings)?)
        .with_access_policy(settings.access_policy()?)
        .with_max_upload_bytes(max_upload_bytes);
    Ok(web::Data::new(state))
}
