//! Correlation identifier for a single users API request.
//!
//! The same value appears in the `trace-id` response header, in the `traceId`
//! field of error bodies and in request log lines. It is held in tokio
//! task-local storage while the request future runs; work moved to another
//! task must be wrapped in [`TraceId::scope`] to see it.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// Random v4 UUID rendered in hyphenated form.
///
/// # Examples
/// ```
/// use users_backend::TraceId;
///
/// fn error_trace() -> Option<String> {
///     TraceId::current().map(|id| id.to_string())
/// }
/// assert_eq!(error_trace(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh identifier for an incoming request.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
