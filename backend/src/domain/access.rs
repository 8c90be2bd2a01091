//! Role-based access control gate.
//!
//! Each catalog route carries an allow-list of roles, or is public. The gate
//! runs after authentication: a restricted route without a claim is
//! unauthorised, a claim whose role is not on the list is forbidden.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::actor::{ActorClaim, ActorValidationError, Role};
use super::error::Error;

/// Routes guarded by the access gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogRoute {
    CategoryList,
    CategoryDetail,
    CategoryCreate,
    CategoryUpdate,
    CategoryDelete,
    ProductList,
    ProductDetail,
    ProductCreate,
    ProductUpdate,
    ProductDelete,
    ToppingList,
    ToppingDetail,
    ToppingCreate,
    ToppingUpdate,
    ToppingDelete,
}

impl CatalogRoute {
    /// Every guarded route.
    pub const ALL: [Self; 15] = [
        Self::CategoryList,
        Self::CategoryDetail,
        Self::CategoryCreate,
        Self::CategoryUpdate,
        Self::CategoryDelete,
        Self::ProductList,
        Self::ProductDetail,
        Self::ProductCreate,
        Self::ProductUpdate,
        Self::ProductDelete,
        Self::ToppingList,
        Self::ToppingDetail,
        Self::ToppingCreate,
        Self::ToppingUpdate,
        Self::ToppingDelete,
    ];
}

/// Who may call a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// No credential required.
    Public,
    /// Only the listed roles; an empty list denies everyone.
    Roles(BTreeSet<Role>),
}

impl RouteAccess {
    /// Allow exactly the given roles.
    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::Roles(roles.into_iter().collect())
    }

    fn permits(&self, role: Role) -> bool {
        match self {
            Self::Public => true,
            Self::Roles(allowed) => allowed.contains(&role),
        }
    }
}

impl fmt::Display for RouteAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Roles(roles) => {
                let names: Vec<&str> = roles.iter().map(|role| role.as_str()).collect();
                f.write_str(&names.join(","))
            }
        }
    }
}

/// Parses `public` or a comma-separated role list such as `admin,manager`.
impl FromStr for RouteAccess {
    type Err = ActorValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("public") {
            return Ok(Self::Public);
        }
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Role::from_str)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self::Roles)
    }
}

/// Per-route allow-lists.
///
/// # Examples
/// ```
/// use catalog::domain::{AccessPolicy, ActorClaim, CatalogRoute, ErrorCode, Role};
///
/// let policy = AccessPolicy::default();
/// let customer = ActorClaim::new("u1", Role::Customer, None).expect("claim");
/// let denied = policy
///     .can_access(CatalogRoute::ToppingCreate, Some(&customer))
///     .expect_err("customers cannot create toppings");
/// assert_eq!(denied.code(), ErrorCode::Forbidden);
/// assert!(policy.can_access(CatalogRoute::ToppingList, None).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    routes: BTreeMap<CatalogRoute, RouteAccess>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        use CatalogRoute as R;
        use Role::{Admin, Manager};

        let admin = || RouteAccess::roles([Admin]);
        let staff = || RouteAccess::roles([Admin, Manager]);
        let routes = CatalogRoute::ALL
            .into_iter()
            .map(|route| {
                let access = match route {
                    R::CategoryList | R::CategoryDetail | R::ProductCreate => admin(),
                    R::CategoryCreate
                    | R::CategoryUpdate
                    | R::CategoryDelete
                    | R::ProductUpdate
                    | R::ProductDelete
                    | R::ToppingCreate
                    | R::ToppingUpdate
                    | R::ToppingDelete => staff(),
                    R::ProductList | R::ProductDetail | R::ToppingList | R::ToppingDetail => {
                        RouteAccess::Public
                    }
                };
                (route, access)
            })
            .collect();
        Self { routes }
    }
}

impl AccessPolicy {
    /// Replace the allow-list for `route`.
    #[must_use]
    pub fn with_route(mut self, route: CatalogRoute, access: RouteAccess) -> Self {
        self.routes.insert(route, access);
        self
    }

    /// Replace the allow-list for several routes at once.
    #[must_use]
    pub fn with_routes(
        self,
        routes: impl IntoIterator<Item = CatalogRoute>,
        access: &RouteAccess,
    ) -> Self {
        routes
            .into_iter()
            .fold(self, |policy, route| policy.with_route(route, access.clone()))
    }

    /// Whether `route` can be called without a credential.
    #[must_use]
    pub fn is_public(&self, route: CatalogRoute) -> bool {
        matches!(self.routes.get(&route), Some(RouteAccess::Public))
    }

    /// Decide whether `actor` may call `route`.
    ///
    /// Routes without an entry deny everyone.
    pub fn can_access(&self, route: CatalogRoute, actor: Option<&ActorClaim>) -> Result<(), Error> {
        let access = self.routes.get(&route);
        if matches!(access, Some(RouteAccess::Public)) {
            return Ok(());
        }
        let Some(actor) = actor else {
            debug!(?route, "access denied: no actor claim");
            return Err(Error::unauthorized("Unauthorized"));
        };
        if access.is_some_and(|allowed| allowed.permits(actor.role())) {
            Ok(())
        } else {
            debug!(?route, role = %actor.role(), subject = actor.subject(), "access denied: role not allowed");
            Err(Error::forbidden("You don't have enough permissions"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ErrorCode, TenantId};
    use rstest::{fixture, rstest};

    fn claim(role: Role) -> ActorClaim {
        let tenant = TenantId::new("t1").expect("tenant");
        ActorClaim::new("subject", role, Some(tenant)).expect("claim")
    }

    #[fixture]
    fn policy() -> AccessPolicy {
        AccessPolicy::default()
    }

    #[rstest]
    #[case(CatalogRoute::CategoryCreate, Role::Manager)]
    #[case(CatalogRoute::CategoryList, Role::Admin)]
    #[case(CatalogRoute::ProductCreate, Role::Admin)]
    #[case(CatalogRoute::ProductUpdate, Role::Manager)]
    #[case(CatalogRoute::ToppingDelete, Role::Manager)]
    fn default_policy_allows_staff(
        policy: AccessPolicy,
        #[case] route: CatalogRoute,
        #[case] role: Role,
    ) {
        assert!(policy.can_access(route, Some(&claim(role))).is_ok());
    }

    #[rstest]
    #[case(CatalogRoute::CategoryList, Role::Manager)]
    #[case(CatalogRoute::ProductCreate, Role::Manager)]
    #[case(CatalogRoute::ToppingCreate, Role::Customer)]
    #[case(CatalogRoute::CategoryDelete, Role::Customer)]
    fn default_policy_forbids_other_roles(
        policy: AccessPolicy,
        #[case] route: CatalogRoute,
        #[case] role: Role,
    ) {
        let err = policy
            .can_access(route, Some(&claim(role)))
            .expect_err("role should be denied");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    fn restricted_routes_without_claim_are_unauthorised(policy: AccessPolicy) {
        let err = policy
            .can_access(CatalogRoute::ToppingUpdate, None)
            .expect_err("missing claim");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn public_routes_need_no_claim(policy: AccessPolicy) {
        assert!(policy.is_public(CatalogRoute::ProductDetail));
        assert!(policy.can_access(CatalogRoute::ProductDetail, None).is_ok());
    }

    #[rstest]
    fn routes_can_be_reconfigured(policy: AccessPolicy) {
        let locked = policy.with_route(CatalogRoute::ToppingList, RouteAccess::roles([Role::Admin]));
        assert!(!locked.is_public(CatalogRoute::ToppingList));
        let err = locked
            .can_access(CatalogRoute::ToppingList, Some(&claim(Role::Customer)))
            .expect_err("customer locked out");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[case("public", RouteAccess::Public)]
    #[case("admin, manager", RouteAccess::roles([Role::Admin, Role::Manager]))]
    #[case("", RouteAccess::roles([]))]
    fn route_access_parses(#[case] raw: &str, #[case] expected: RouteAccess) {
        assert_eq!(raw.parse::<RouteAccess>(), Ok(expected));
    }

    #[rstest]
    fn empty_allow_lists_deny_everyone(policy: AccessPolicy) {
        let closed = policy.with_route(CatalogRoute::CategoryCreate, RouteAccess::roles([]));
        let err = closed
            .can_access(CatalogRoute::CategoryCreate, Some(&claim(Role::Admin)))
            .expect_err("closed route");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
