//! Tenant scoping for product and topping mutations.
//!
//! Admins bypass scoping. Every other role is confined to the tenant named in
//! its claim: updates and deletes of foreign resources are forbidden, and
//! creates are forced into the actor's own tenant.

use serde_json::{Map, Value};
use tracing::{debug, error};

use super::actor::{ActorClaim, Role, TenantId};
use super::error::Error;

/// Payload key holding the owning tenant.
pub const TENANT_ID_FIELD: &str = "tenantId";

/// Resources owned by a single tenant.
pub trait TenantOwned {
    /// Owning tenant.
    fn tenant_id(&self) -> &TenantId;
}

/// Resource kinds named in scoping errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Category,
    Product,
    Topping,
}

impl ResourceKind {
    /// Display name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Product => "Product",
            Self::Topping => "Topping",
        }
    }

    /// Error returned when a resource of this kind does not exist.
    #[must_use]
    pub fn not_found(self) -> Error {
        Error::not_found(format!("{} not found", self.name()))
    }
}

/// Mutations subject to ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Update,
    Delete,
}

impl Mutation {
    const fn verb(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Central ownership policy applied uniformly by resource type.
pub struct TenantScope;

impl TenantScope {
    /// Resolve the looked-up target of an update or delete.
    ///
    /// A missing resource is `NotFound` before any ownership check runs; a
    /// found resource owned by another tenant is `Forbidden`.
    ///
    /// # Examples
    /// ```
    /// use catalog::domain::{ActorClaim, ErrorCode, Mutation, ResourceKind, Role, TenantId, TenantOwned, TenantScope};
    ///
    /// struct Owned(TenantId);
    /// impl TenantOwned for Owned {
    ///     fn tenant_id(&self) -> &TenantId { &self.0 }
    /// }
    ///
    /// let manager = ActorClaim::new("m", Role::Manager, Some(TenantId::new("T1").unwrap())).unwrap();
    /// let missing = TenantScope::resolve_for_mutation::<Owned>(&manager, ResourceKind::Topping, Mutation::Delete, None);
    /// assert_eq!(missing.err().map(|e| e.code()), Some(ErrorCode::NotFound));
    /// ```
    pub fn resolve_for_mutation<R: TenantOwned>(
        actor: &ActorClaim,
        kind: ResourceKind,
        mutation: Mutation,
        found: Option<R>,
    ) -> Result<R, Error> {
        let resource = found.ok_or_else(|| kind.not_found())?;
        if actor.role() == Role::Admin {
            return Ok(resource);
        }
        if actor.tenant_id() == Some(resource.tenant_id()) {
            Ok(resource)
        } else {
            debug!(
                subject = actor.subject(),
                actor_tenant = actor.tenant_id().map(TenantId::as_str),
                owner_tenant = resource.tenant_id().as_str(),
                resource = kind.name(),
                "tenant scope denied mutation"
            );
            Err(Error::forbidden(format!(
                "You are not authorised to {} this {}.",
                mutation.verb(),
                kind.name()
            )))
        }
    }

    /// Force the owner of a resource being created.
    ///
    /// Non-admin actors have their own tenant written into the payload,
    /// replacing any client-supplied value. Admin payloads are left as sent.
    pub fn assign_owner(actor: &ActorClaim, payload: &mut Map<String, Value>) -> Result<(), Error> {
        if actor.role() == Role::Admin {
            return Ok(());
        }
        let Some(tenant) = actor.tenant_id() else {
            error!(subject = actor.subject(), "tenant id missing from actor claim");
            return Err(Error::internal("Tenant ID is missing in auth"));
        };
        payload.insert(
            TENANT_ID_FIELD.to_owned(),
            Value::String(tenant.as_str().to_owned()),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Owned(TenantId);

    impl TenantOwned for Owned {
        fn tenant_id(&self) -> &TenantId {
            &self.0
        }
    }

    fn tenant(id: &str) -> TenantId {
        TenantId::new(id).expect("tenant")
    }

    fn actor(role: Role, tenant_id: Option<&str>) -> ActorClaim {
        ActorClaim::new("subject", role, tenant_id.map(tenant)).expect("claim")
    }

    #[rstest]
    #[case(Mutation::Update, "You are not authorised to update this Topping.")]
    #[case(Mutation::Delete, "You are not authorised to delete this Topping.")]
    fn managers_cannot_touch_foreign_resources(#[case] mutation: Mutation, #[case] message: &str) {
        let err = TenantScope::resolve_for_mutation(
            &actor(Role::Manager, Some("T1")),
            ResourceKind::Topping,
            mutation,
            Some(Owned(tenant("T2"))),
        )
        .expect_err("foreign tenant");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    #[case(Mutation::Update)]
    #[case(Mutation::Delete)]
    fn managers_may_touch_own_resources(#[case] mutation: Mutation) {
        let resolved = TenantScope::resolve_for_mutation(
            &actor(Role::Manager, Some("T1")),
            ResourceKind::Product,
            mutation,
            Some(Owned(tenant("T1"))),
        );
        assert_eq!(resolved, Ok(Owned(tenant("T1"))));
    }

    #[rstest]
    fn missing_resources_are_not_found_before_ownership() {
        let err = TenantScope::resolve_for_mutation::<Owned>(
            &actor(Role::Manager, Some("T1")),
            ResourceKind::Product,
            Mutation::Update,
            None,
        )
        .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Product not found");
    }

    #[rstest]
    fn admins_bypass_scoping() {
        let resolved = TenantScope::resolve_for_mutation(
            &actor(Role::Admin, None),
            ResourceKind::Topping,
            Mutation::Delete,
            Some(Owned(tenant("T9"))),
        );
        assert!(resolved.is_ok());
    }

    #[rstest]
    fn managers_without_tenant_are_forbidden() {
        let err = TenantScope::resolve_for_mutation(
            &actor(Role::Manager, None),
            ResourceKind::Topping,
            Mutation::Update,
            Some(Owned(tenant("T1"))),
        )
        .expect_err("no tenant");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"tenantId": "T2"}))]
    fn manager_creates_are_forced_into_own_tenant(#[case] body: Value) {
        let Value::Object(mut payload) = body else {
            panic!("object fixture");
        };
        TenantScope::assign_owner(&actor(Role::Manager, Some("T1")), &mut payload)
            .expect("owner assigned");
        assert_eq!(payload.get(TENANT_ID_FIELD), Some(&json!("T1")));
    }

    #[rstest]
    fn admin_creates_keep_requested_tenant() {
        let mut payload = Map::new();
        payload.insert(TENANT_ID_FIELD.to_owned(), json!("T5"));
        TenantScope::assign_owner(&actor(Role::Admin, None), &mut payload).expect("admin");
        assert_eq!(payload.get(TENANT_ID_FIELD), Some(&json!("T5")));
    }

    #[rstest]
    fn manager_creates_without_claim_tenant_fail_internally() {
        let mut payload = Map::new();
        let err = TenantScope::assign_owner(&actor(Role::Manager, None), &mut payload)
            .expect_err("missing tenant");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "Tenant ID is missing in auth");
    }
}
