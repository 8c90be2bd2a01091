//! Port for turning a bearer credential into an actor claim.
use crate::domain::ActorClaim;

use super::define_port_error;

define_port_error! {
    /// Reasons a credential was not accepted.
    pub enum ClaimVerificationError {
        /// The credential has expired.
        Expired => "credential expired",
        /// The credential is malformed, unsigned, or carries unusable claims.
        Invalid { message: String } => "credential rejected: {message}",
    }
}

/// Verifies credentials produced by the identity service.
#[cfg_attr(test, mockall::automock)]
pub trait ClaimVerifier: Send + Sync {
    /// Verify `token` and extract its claim set.
    fn verify(&self, token: &str) -> Result<ActorClaim, ClaimVerificationError>;
}
