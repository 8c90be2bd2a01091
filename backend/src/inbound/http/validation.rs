//! Shared validation helpers for inbound HTTP adapters.

use tracing::debug;

use crate::domain::{Error, ResourceId};

/// Parse a path identifier, failing with `message` when malformed.
pub(crate) fn parse_resource_id(raw: &str, message: &'static str) -> Result<ResourceId, Error> {
    ResourceId::parse(raw).map_err(|_| {
        debug!(raw, "malformed resource id in path");
        Error::invalid_request(message)
    })
}
