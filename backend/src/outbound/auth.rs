//! JWT-backed [`ClaimVerifier`].
//!
//! Access tokens come from the external identity service. The adapter
//! checks signature, expiry and (optionally) issuer, then lifts `sub`,
//! `role` and `tenantId` into an [`ActorClaim`].

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

use crate::domain::ports::{ClaimVerificationError, ClaimVerifier};
use crate::domain::{ActorClaim, Role, TenantId};

#[derive(Debug, Deserialize)]
struct AccessTokenClaims {
    sub: String,
    role: String,
    #[serde(rename = "tenantId", default)]
    tenant_id: Option<String>,
}

/// Verifies HS256 or RS256 access tokens.
#[derive(Clone)]
pub struct JwtClaimVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtClaimVerifier {
    /// Verify tokens signed with a shared secret.
    pub fn hs256(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify tokens signed by the identity service's RSA key.
    pub fn rs256_pem(public_key_pem: &[u8]) -> Result<Self, ClaimVerificationError> {
        let key = DecodingKey::from_rsa_pem(public_key_pem)
            .map_err(|err| ClaimVerificationError::invalid(format!("bad public key: {err}")))?;
        Ok(Self {
            key,
            validation: Validation::new(Algorithm::RS256),
        })
    }

    /// Also require the `iss` claim to match.
    #[must_use]
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }
}

impl ClaimVerifier for JwtClaimVerifier {
    fn verify(&self, token: &str) -> Result<ActorClaim, ClaimVerificationError> {
        let claims = jsonwebtoken::decode::<AccessTokenClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => ClaimVerificationError::expired(),
                _ => {
                    debug!(error = %err, "token rejected");
                    ClaimVerificationError::invalid(err.to_string())
                }
            })?;

        let role: Role = claims
            .role
            .parse()
            .map_err(|err: crate::domain::ActorValidationError| {
                ClaimVerificationError::invalid(err.to_string())
            })?;
        let tenant_id = claims
            .tenant_id
            .filter(|tenant| !tenant.trim().is_empty())
            .map(TenantId::new)
            .transpose()
            .map_err(|err| ClaimVerificationError::invalid(err.to_string()))?;
        ActorClaim::new(claims.sub, role, tenant_id)
            .map_err(|err| ClaimVerificationError::invalid(err.to_string()))
    }
}
