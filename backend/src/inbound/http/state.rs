//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CategoryCatalog, ClaimVerifier, ProductCatalog, ToppingCatalog};
use crate::domain::{AccessPolicy, DEFAULT_MAX_UPLOAD_BYTES};

/// Parameter object bundling the resource use cases.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub categories: Arc<dyn CategoryCatalog>,
    pub products: Arc<dyn ProductCatalog>,
    pub toppings: Arc<dyn ToppingCatalog>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub categories: Arc<dyn CategoryCatalog>,
    pub products: Arc<dyn ProductCatalog>,
    pub toppings: Arc<dyn ToppingCatalog>,
    pub claims: Arc<dyn ClaimVerifier>,
    pub access: Arc<AccessPolicy>,
    pub max_upload_bytes: usize,
}

impl HttpState {
    /// Construct state with the default access policy and upload limit.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use catalog::domain::ports::ClaimVerifier;
    /// use catalog::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// fn build(ports: HttpStatePorts, claims: Arc<dyn ClaimVerifier>) -> HttpState {
    ///     HttpState::new(ports, claims).with_max_upload_bytes(512 * 1024)
    /// }
    /// ```
    pub fn new(ports: HttpStatePorts, claims: Arc<dyn ClaimVerifier>) -> Self {
        let HttpStatePorts {
            categories,
            products,
            toppings,
        } = ports;
        Self {
            categories,
            products,
            toppings,
            claims,
            access: Arc::new(AccessPolicy::default()),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Replace the per-route allow-lists.
    #[must_use]
    pub fn with_access_policy(mut self, access: AccessPolicy) -> Self {
        self.access = Arc::new(access);
        self
    }

    /// Replace the upload size limit.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
