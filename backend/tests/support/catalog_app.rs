//! Shared wiring for catalog integration suites.
//!
//! Services run over the in-memory repositories, a recording object store
//! and a real HS256 [`JwtClaimVerifier`].

use std::sync::{Arc, Mutex};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::{AUTHORIZATION, HeaderName};
use actix_web::{App, web};
use async_trait::async_trait;
use catalog::Trace;
use catalog::domain::ports::{ObjectStorage, ObjectStorageError};
use catalog::domain::{AssetName, CategoryService, ProductService, ToppingService};
use catalog::inbound::http::{
    self,
    state::{HttpState, HttpStatePorts},
};
use catalog::outbound::auth::JwtClaimVerifier;
use catalog::outbound::memory::{
    MemoryCategoryRepository, MemoryProductRepository, MemoryToppingRepository,
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;

pub const SECRET: &[u8] = b"integration-secret";
pub const PUBLIC_BASE: &str = "http://cdn.test/uploads";
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0];

/// Object store double recording every call.
#[derive(Default)]
pub struct RecordingStorage {
    uploads: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    fail_uploads: Mutex<bool>,
}

impl RecordingStorage {
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().expect("uploads lock").clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().expect("deletes lock").clone()
    }

    pub fn fail_uploads(&self) {
        *self.fail_uploads.lock().expect("flag lock") = true;
    }
}

#[async_trait]
impl ObjectStorage for RecordingStorage {
    async fn upload(&self, name: &AssetName, _bytes: &[u8]) -> Result<(), ObjectStorageError> {
        if *self.fail_uploads.lock().expect("flag lock") {
            return Err(ObjectStorageError::upload("store offline"));
        }
        self.uploads
            .lock()
            .expect("uploads lock")
            .push(name.as_str().to_owned());
        Ok(())
    }

    async fn delete(&self, name_or_uri: &str) -> Result<(), ObjectStorageError> {
        self.deletes
            .lock()
            .expect("deletes lock")
            .push(name_or_uri.to_owned());
        Ok(())
    }

    fn object_uri(&self, name: &AssetName) -> String {
        format!("{PUBLIC_BASE}/{name}")
    }
}

/// Services over fresh in-memory repositories.
pub struct CatalogHarness {
    pub storage: Arc<RecordingStorage>,
    pub state: HttpState,
}

impl CatalogHarness {
    pub fn new() -> Self {
        let storage = Arc::new(RecordingStorage::default());
        let shared: Arc<dyn ObjectStorage> = storage.clone();
        let ports = HttpStatePorts {
            categories: Arc::new(CategoryService::new(Arc::new(
                MemoryCategoryRepository::default(),
            ))),
            products: Arc::new(ProductService::new(
                Arc::new(MemoryProductRepository::default()),
                Arc::clone(&shared),
            )),
            toppings: Arc::new(ToppingService::new(
                Arc::new(MemoryToppingRepository::default()),
                shared,
            )),
        };
        let state = HttpState::new(ports, Arc::new(JwtClaimVerifier::hs256(SECRET)));
        Self { storage, state }
    }

    /// The catalog API mounted the way the server mounts it.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(http::configure))
    }
}

/// Signed access token for `role`, optionally scoped to `tenant`.
pub fn token(role: &str, tenant: Option<&str>) -> String {
    let mut claims = json!({
        "sub": format!("{role}-user"),
        "role": role,
        "exp": chrono::Utc::now().timestamp() + 600,
    });
    if let Some(tenant) = tenant {
        claims["tenantId"] = json!(tenant);
    }
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET),
    )
    .expect("token encodes")
}

/// Authorization header for `token`.
pub fn bearer(token: &str) -> (HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

/// `multipart/form-data` body with text fields and an optional image.
pub fn multipart(
    fields: &[(&str, &str)],
    image: Option<(&str, &[u8])>,
) -> (String, Vec<u8>) {
    const BOUNDARY: &str = "catalog-integration";
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((content_type, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"upload\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
