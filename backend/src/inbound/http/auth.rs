//! Authentication and the per-route access gate for HTTP handlers.
//!
//! Credentials are read from an `Authorization: Bearer` header or, failing
//! that, the `accessToken` cookie. A presented credential must verify on
//! every route; an absent one is only acceptable on public routes.

use actix_web::HttpRequest;
use actix_web::http::header::AUTHORIZATION;
use tracing::{debug, warn};

use crate::domain::ports::ClaimVerificationError;
use crate::domain::{ActorClaim, CatalogRoute, Error};

use super::ApiResult;
use super::state::HttpState;

/// Cookie consulted when no bearer header is sent.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

const BEARER_PREFIX: &str = "Bearer ";

/// Raw credential carried by the request, if any.
pub fn credential(req: &HttpRequest) -> Option<String> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned);
    header.or_else(|| {
        req.cookie(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_owned())
            .filter(|token| !token.is_empty())
    })
}

/// Verify the request credential, if one was sent.
pub fn authenticate(req: &HttpRequest, state: &HttpState) -> ApiResult<Option<ActorClaim>> {
    let Some(token) = credential(req) else {
        return Ok(None);
    };
    match state.claims.verify(&token) {
        Ok(claim) => {
            debug!(subject = claim.subject(), role = %claim.role(), "credential verified");
            Ok(Some(claim))
        }
        Err(ClaimVerificationError::Expired) => {
            warn!("expired credential rejected");
            Err(Error::unauthorized("Token has expired"))
        }
        Err(err) => {
            warn!(error = %err, "credential rejected");
            Err(Error::unauthorized("Invalid token"))
        }
    }
}

/// Authenticate the request and apply the access gate for `route`.
pub fn authorize(
    req: &HttpRequest,
    state: &HttpState,
    route: CatalogRoute,
) -> ApiResult<Option<ActorClaim>> {
    let actor = authenticate(req, state)?;
    state.access.can_access(route, actor.as_ref())?;
    Ok(actor)
}

/// Like [`authorize`], but the handler needs an actor even when an operator
/// has opened the route to the public.
pub fn authorize_actor(
    req: &HttpRequest,
    state: &HttpState,
    route: CatalogRoute,
) -> ApiResult<ActorClaim> {
    authorize(req, state, route)?.ok_or_else(|| Error::unauthorized("Unauthorized"))
}
