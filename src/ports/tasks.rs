//! Task source port for fetching snapshots from the tracker API.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

/// Boxed future type alias used by [`TaskSource`] to keep the trait dyn-compatible.
pub type TaskFuture<'a> =
    Pin<Box<dyn Future<Output = Result<FetchOutcome, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Result of a space fetch.
///
/// A space is fetched list by list; a failing list is skipped rather than
/// discarding the tasks already gathered, so the outcome carries both the
/// accumulated tasks and a description of each skipped list.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    /// Raw task objects exactly as the tracker sent them.
    pub tasks: Vec<Value>,
    /// One human-readable message per list that could not be fetched.
    pub failures: Vec<String>,
}

/// Fetches the full set of tasks visible in one tracker space.
///
/// The returned values are raw task objects exactly as the tracker sent
/// them; normalization into typed records happens downstream in the
/// snapshot module.
pub trait TaskSource: Send + Sync {
    /// Fetches every task in the given space, across all of its lists.
    ///
    /// # Errors
    ///
    /// Returns an error only if the space itself cannot be listed
    /// (network, auth). Per-list failures are reported through
    /// [`FetchOutcome::failures`] instead.
    fn fetch_space_tasks(&self, space_id: &str) -> TaskFuture<'_>;
}
