//! Per-key entry state machine
//!
//! Lifecycle: `Idle -> Pending -> (Success | Error)`. A refetch from a
//! settled state goes back to `Pending` while retaining the previous value,
//! so snapshots keep serving stale data during revalidation.

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error as ThisError;
use tokio::sync::watch;

/// Result of one fetch attempt, shared by every subscriber of that attempt
pub(crate) type FetchResult<V> = Result<Arc<V>, QueryError>;

/// Error surfaced by the cache for a failed fetch.
///
/// The underlying fetcher error is wrapped untouched; callers can recover the
/// concrete type via [`QueryError::fetch_source`] and `downcast_ref`.
#[derive(Debug, Clone, ThisError)]
pub enum QueryError {
    /// The fetcher returned an error
    #[error("{0}")]
    Fetch(Arc<dyn Error + Send + Sync>),

    /// The fetch task stopped without producing a result
    #[error("fetch task stopped before settling")]
    Aborted,
}

impl QueryError {
    /// Wrap a fetcher error without altering it
    pub fn fetch<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Fetch(Arc::new(err))
    }

    /// The wrapped fetcher error, if this is a fetch failure
    pub fn fetch_source(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::Fetch(source) => Some(source.as_ref()),
            Self::Aborted => None,
        }
    }
}

/// Lifecycle state of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Entry exists (e.g. a subscriber registered) but nothing was fetched yet
    Idle,
    /// A fetch is in flight and no result has been applied for it
    Pending,
    /// Last applied fetch succeeded
    Success,
    /// Last applied fetch failed
    Error,
}

/// Reactive read of one cache entry: `{data, is_loading, error}` plus
/// revalidation detail.
#[derive(Debug, Clone)]
pub struct QueryState<V> {
    pub status: QueryStatus,
    /// Last successfully applied value; retained while revalidating
    pub data: Option<Arc<V>>,
    pub error: Option<QueryError>,
    /// A fetch is currently in flight for this key
    pub is_fetching: bool,
    /// Entry was invalidated and will refetch on next read
    pub is_stale: bool,
    pub updated_at: Option<Instant>,
}

impl<V> QueryState<V> {
    /// Loading means fetching with nothing to show yet. A revalidating entry
    /// with retained data is fetching but not loading.
    pub fn is_loading(&self) -> bool {
        self.is_fetching && self.data.is_none()
    }
}

impl<V> Default for QueryState<V> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            is_fetching: false,
            is_stale: false,
            updated_at: None,
        }
    }
}

/// Internal bookkeeping for one key
pub(crate) struct QueryEntry<V> {
    pub(crate) status: QueryStatus,
    pub(crate) data: Option<Arc<V>>,
    pub(crate) error: Option<QueryError>,
    /// Invalidated; next fetch revalidates even if a fetch is in flight
    pub(crate) stale: bool,
    /// Highest sequence number handed to an issued fetch
    pub(crate) issued_seq: u64,
    /// Sequence number of the last applied completion
    pub(crate) applied_seq: u64,
    /// Receiver for the newest in-flight fetch, if any
    pub(crate) inflight: Option<watch::Receiver<Option<FetchResult<V>>>>,
    /// Sequence number owning `inflight`
    pub(crate) inflight_seq: u64,
    pub(crate) subscribers: usize,
    /// When the subscriber count last dropped to zero
    pub(crate) released_at: Option<Instant>,
    pub(crate) updated_at: Option<Instant>,
}

impl<V> QueryEntry<V> {
    pub(crate) fn new() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            stale: false,
            issued_seq: 0,
            applied_seq: 0,
            inflight: None,
            inflight_seq: 0,
            subscribers: 0,
            released_at: None,
            updated_at: None,
        }
    }

    /// A settled, not-invalidated success can be served without fetching
    pub(crate) fn is_fresh(&self) -> bool {
        self.status == QueryStatus::Success && !self.stale
    }

    pub(crate) fn snapshot(&self) -> QueryState<V> {
        QueryState {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            is_fetching: self.inflight.is_some(),
            is_stale: self.stale,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, ThisError)]
    #[error("boom: {0}")]
    struct Boom(&'static str);

    #[test]
    fn fetch_error_preserves_source() {
        let err = QueryError::fetch(Boom("offline"));
        assert_eq!(err.to_string(), "boom: offline");

        let source = err.fetch_source().expect("source");
        assert!(source.downcast_ref::<Boom>().is_some());
        assert!(QueryError::Aborted.fetch_source().is_none());
    }

    #[test]
    fn new_entry_is_idle_and_empty() {
        let entry: QueryEntry<i32> = QueryEntry::new();
        let state = entry.snapshot();

        assert_eq!(state.status, QueryStatus::Idle);
        assert!(state.data.is_none());
        assert!(!state.is_fetching);
        assert!(!state.is_loading());
    }

    #[test]
    fn loading_requires_fetching_without_data() {
        let mut entry: QueryEntry<i32> = QueryEntry::new();
        let (_tx, rx) = watch::channel(None);
        entry.inflight = Some(rx);
        entry.status = QueryStatus::Pending;

        assert!(entry.snapshot().is_loading());

        // Revalidation with retained data is not "loading".
        entry.data = Some(Arc::new(7));
        let state = entry.snapshot();
        assert!(state.is_fetching);
        assert!(!state.is_loading());
    }
}
