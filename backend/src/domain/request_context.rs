//! Request-scoped context for correlation across logs and errors.
//!
//! `RequestContext` carries the trace identifier and the path of the request
//! being served. It lives in task-local storage so domain errors can capture
//! both at construction without threading them through every call.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`RequestContext::scope`] when moving work onto another task.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use catalog::domain::TraceId;
///
/// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
///     .parse()
///     .expect("valid UUID");
/// assert_eq!(trace_id.to_string(), "00000000-0000-0000-0000-000000000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random trace identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn generate() -> Self { Self(Uuid::new_v4()) }

    /// Access the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Trace identifier plus request path for the request currently in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    trace_id: TraceId,
    path: String,
}

impl RequestContext {
    /// Build a context for a request to `path`.
    #[must_use]
    pub fn new(trace_id: TraceId, path: impl Into<String>) -> Self {
        Self {
            trace_id,
            path: path.into(),
        }
    }

    /// Trace identifier of the request.
    #[must_use]
    pub const fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// Original request path, including the query string when present.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the context in scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        REQUEST_CONTEXT.try_with(Clone::clone).ok()
    }

    /// Execute the provided future with `context` in scope.
    ///
    /// # Examples
    /// ```
    /// use catalog::domain::{RequestContext, TraceId};
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let context = RequestContext::new(TraceId::generate(), "/api/v1/toppings");
    /// let observed = RequestContext::scope(context.clone(), async { RequestContext::current() }).await;
    /// assert_eq!(observed, Some(context));
    /// # });
    /// ```
    pub async fn scope<Fut>(context: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_CONTEXT.scope(context, fut).await
    }
}
