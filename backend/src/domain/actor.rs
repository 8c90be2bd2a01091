//! Authenticated actors: roles, tenants, and the claim set attached to a
//! request once its credential has been verified.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised while building actor primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorValidationError {
    UnknownRole(String),
    EmptyTenantId,
    EmptySubject,
}

impl fmt::Display for ActorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRole(role) => write!(f, "unknown role: {role}"),
            Self::EmptyTenantId => write!(f, "tenant id must not be empty"),
            Self::EmptySubject => write!(f, "subject must not be empty"),
        }
    }
}

impl std::error::Error for ActorValidationError {}

/// Role carried by an actor claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to every tenant's resources.
    Admin,
    /// Manages the resources of exactly one tenant.
    Manager,
    /// Read-only storefront access.
    Customer,
}

impl Role {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ActorValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "customer" => Ok(Self::Customer),
            other => Err(ActorValidationError::UnknownRole(other.to_owned())),
        }
    }
}

/// Isolation boundary owning products and toppings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "tenant-1")]
pub struct TenantId(String);

impl TenantId {
    /// Validate and construct a tenant identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, ActorValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ActorValidationError::EmptyTenantId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TenantId {
    type Error = ActorValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TenantId> for String {
    fn from(value: TenantId) -> Self {
        value.0
    }
}

/// Identity and role extracted from a verified credential.
///
/// Immutable for the lifetime of the request it is attached to.
///
/// # Examples
/// ```
/// use catalog::domain::{ActorClaim, Role, TenantId};
///
/// let tenant = TenantId::new("t1").expect("tenant");
/// let claim = ActorClaim::new("user-7", Role::Manager, Some(tenant.clone())).expect("claim");
/// assert_eq!(claim.tenant_id(), Some(&tenant));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorClaim {
    subject: String,
    role: Role,
    tenant_id: Option<TenantId>,
}

impl ActorClaim {
    /// Build a claim, rejecting an empty subject.
    pub fn new(
        subject: impl Into<String>,
        role: Role,
        tenant_id: Option<TenantId>,
    ) -> Result<Self, ActorValidationError> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(ActorValidationError::EmptySubject);
        }
        Ok(Self {
            subject,
            role,
            tenant_id,
        })
    }

    /// Subject (user) identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Tenant the actor belongs to, when the credential carries one.
    #[must_use]
    pub const fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant_id.as_ref()
    }
}
