//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    ClaimVerificationError, ClaimVerifier, MockCategoryCatalog, MockProductCatalog,
    MockToppingCatalog,
};
use crate::domain::{ActorClaim, Role, TenantId};

use super::state::{HttpState, HttpStatePorts};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const MANAGER_TOKEN: &str = "manager-token";
pub const CUSTOMER_TOKEN: &str = "customer-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

/// Smallest valid PNG signature plus padding.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

/// Claim verifier accepting a fixed set of tokens.
///
/// The manager belongs to tenant `T1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClaimVerifier;

impl ClaimVerifier for FixtureClaimVerifier {
    fn verify(&self, token: &str) -> Result<ActorClaim, ClaimVerificationError> {
        let claim = match token {
            ADMIN_TOKEN => ActorClaim::new("admin-1", Role::Admin, None),
            MANAGER_TOKEN => ActorClaim::new(
                "manager-1",
                Role::Manager,
                TenantId::new("T1").ok(),
            ),
            CUSTOMER_TOKEN => ActorClaim::new("customer-1", Role::Customer, None),
            EXPIRED_TOKEN => return Err(ClaimVerificationError::expired()),
            other => return Err(ClaimVerificationError::invalid(format!("unknown token {other}"))),
        };
        claim.map_err(|err| ClaimVerificationError::invalid(err.to_string()))
    }
}

/// Bearer header value for `token`.
pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (actix_web::http::header::AUTHORIZATION, format!("Bearer {token}"))
}

/// State whose catalogs carry the given mocks.
pub fn state_with(
    categories: MockCategoryCatalog,
    products: MockProductCatalog,
    toppings: MockToppingCatalog,
) -> HttpState {
    HttpState::new(
        HttpStatePorts {
            categories: Arc::new(categories),
            products: Arc::new(products),
            toppings: Arc::new(toppings),
        },
        Arc::new(FixtureClaimVerifier),
    )
}

/// State whose catalogs expect no calls.
pub fn test_state() -> HttpState {
    state_with(
        MockCategoryCatalog::new(),
        MockProductCatalog::new(),
        MockToppingCatalog::new(),
    )
}

/// Builds `multipart/form-data` bodies for handler tests.
#[derive(Debug)]
pub struct MultipartBuilder {
    boundary: String,
    body: Vec<u8>,
}

impl Default for MultipartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self {
            boundary: "catalog-test-boundary".to_owned(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.open_part(&format!("form-data; name=\"{name}\""), None);
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    #[must_use]
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.open_part(
            &format!("form-data; name=\"{name}\"; filename=\"{filename}\""),
            Some(content_type),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Content type header value and encoded body.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }

    fn open_part(&mut self, disposition: &str, content_type: Option<&str>) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body
            .extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
        if let Some(content_type) = content_type {
            self.body
                .extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        self.body.extend_from_slice(b"\r\n");
    }
}
