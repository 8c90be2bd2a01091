//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; services build them from port failures, validation outcomes,
//! and policy decisions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::request_context::RequestContext;
use super::validation::FieldError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// Storage, object storage, or another unexpected failure.
    InternalError,
}

impl ErrorCode {
    /// Error kind name rendered in error envelopes.
    #[must_use]
    pub const fn kind_name(self) -> &'static str {
        match self {
            Self::InvalidRequest => "BadRequestError",
            Self::Unauthorized => "UnauthorizedError",
            Self::Forbidden => "ForbiddenError",
            Self::NotFound => "NotFoundError",
            Self::InternalError => "InternalServerError",
        }
    }
}

/// Domain error payload.
///
/// Captures the request context in scope at construction so responses can be
/// correlated with logs.
///
/// # Examples
/// ```
/// use catalog::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Topping not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.field_errors().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    path: Option<String>,
    field_errors: Vec<FieldError>,
}

impl Error {
    /// Create a new error, capturing the current request context if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let context = RequestContext::current();
        Self {
            code,
            message: message.into(),
            trace_id: context.as_ref().map(|ctx| ctx.trace_id().to_string()),
            path: context.map(|ctx| ctx.path().to_owned()),
            field_errors: Vec::new(),
        }
    }

    /// Validation failure carrying every per-field message.
    pub fn validation(field_errors: Vec<FieldError>) -> Self {
        let mut error = Self::invalid_request("Invalid input data");
        error.field_errors = field_errors;
        error
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured at construction.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Request path captured at construction.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Per-field validation failures; empty for every other error.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Attach an explicit trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach an explicit request path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::TraceId;
    use rstest::rstest;

    #[rstest]
    fn constructors_set_codes() {
        assert_eq!(Error::invalid_request("bad").code(), ErrorCode::InvalidRequest);
        assert_eq!(Error::unauthorized("no").code(), ErrorCode::Unauthorized);
        assert_eq!(Error::forbidden("no").code(), ErrorCode::Forbidden);
        assert_eq!(Error::not_found("gone").code(), ErrorCode::NotFound);
        assert_eq!(Error::internal("boom").code(), ErrorCode::InternalError);
    }

    #[rstest]
    fn context_is_absent_out_of_scope() {
        let error = Error::internal("boom");
        assert!(error.trace_id().is_none());
        assert!(error.path().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn new_captures_request_context_in_scope() {
        let trace_id = TraceId::generate();
        let context = RequestContext::new(trace_id, "/api/v1/toppings/abc");
        let error = RequestContext::scope(context, async { Error::not_found("Topping not found") }).await;

        assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
        assert_eq!(error.path(), Some("/api/v1/toppings/abc"));
    }

    #[rstest]
    fn validation_keeps_every_field_error() {
        let error = Error::validation(vec![
            FieldError::new("name", "Name must be a string"),
            FieldError::new("price", "Price must be a number greater than 0"),
        ]);

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "Invalid input data");
        assert_eq!(error.field_errors().len(), 2);
    }

    #[rstest]
    #[case(ErrorCode::InvalidRequest, "BadRequestError")]
    #[case(ErrorCode::Forbidden, "ForbiddenError")]
    #[case(ErrorCode::InternalError, "InternalServerError")]
    fn kind_names_follow_http_error_names(#[case] code: ErrorCode, #[case] expected: &str) {
        assert_eq!(code.kind_name(), expected);
    }
}
