//! Query cache storage: dedup, issue ordering, invalidation, GC
//!
//! Storage is a `HashMap` behind a `std::sync::RwLock`; the lock is never
//! held across an await. Fetches run in spawned tasks so that a caller going
//! away mid-request does not cancel the underlying network call: the result
//! still settles the cache for other subscribers and future reads.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, trace};

use super::entry::{FetchResult, QueryEntry, QueryError, QueryState, QueryStatus};
use super::key::QueryKey;
use super::stats::{MetricsCollector, QueryStats};
use crate::clock::{Clock, SystemClock};

/// Configuration for [`QueryCache`]
#[derive(Debug, Clone)]
pub struct QueryCacheConfig {
    /// How long an entry with zero subscribers survives before [`QueryCache::sweep`]
    /// removes it
    pub retention: Duration,
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self { retention: Duration::from_secs(300) }
    }
}

/// Declarative invalidation set applied after a successful mutation
#[derive(Debug, Clone, Default)]
pub struct Invalidations {
    keys: Vec<QueryKey>,
    prefixes: Vec<String>,
}

impl Invalidations {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: QueryKey) -> Self {
        self.keys.push(key);
        self
    }

    pub fn prefix(mut self, resource: impl Into<String>) -> Self {
        self.prefixes.push(resource.into());
        self
    }
}

struct Storage<V> {
    entries: HashMap<QueryKey, QueryEntry<V>>,
}

struct Inner<V, C> {
    storage: RwLock<Storage<V>>,
    config: QueryCacheConfig,
    metrics: MetricsCollector,
    clock: C,
}

impl<V, C> Inner<V, C>
where
    C: Clock,
{
    fn storage_read(&self) -> RwLockReadGuard<'_, Storage<V>> {
        self.storage.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn storage_write(&self) -> RwLockWriteGuard<'_, Storage<V>> {
        self.storage.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a completed fetch. Completions are sequenced by issue order:
    /// a completion older than the last applied one is discarded, so a slow
    /// superseded request can never overwrite a newer result.
    fn apply(&self, key: &QueryKey, seq: u64, result: &FetchResult<V>) {
        let mut storage = self.storage_write();
        let Some(entry) = storage.entries.get_mut(key) else {
            // Entry cleared while the fetch was in flight; drop the result.
            return;
        };

        if seq > entry.applied_seq {
            entry.applied_seq = seq;
            entry.updated_at = Some(self.clock.now());
            match result {
                Ok(value) => {
                    entry.status = QueryStatus::Success;
                    entry.data = Some(Arc::clone(value));
                    entry.error = None;
                }
                Err(err) => {
                    entry.status = QueryStatus::Error;
                    entry.error = Some(err.clone());
                }
            }
        } else {
            self.metrics.record_discard();
            trace!(key = %key, seq, "discarding completion superseded by a later issue");
        }

        if entry.inflight_seq == seq {
            entry.inflight = None;
        }
    }
}

/// Request-keyed async cache with in-flight dedup and stale-while-revalidate.
///
/// Values are shared as `Arc<V>`, so `V` itself never needs to be `Clone`.
/// See the [module docs](super) for the full contract.
pub struct QueryCache<V, C = SystemClock> {
    inner: Arc<Inner<V, C>>,
}

impl<V, C> Clone for QueryCache<V, C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<V> QueryCache<V, SystemClock>
where
    V: Send + Sync + 'static,
{
    /// Create a cache with the default system clock
    pub fn new(config: QueryCacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

enum ReadPlan<V> {
    Join(watch::Receiver<Option<FetchResult<V>>>),
    Issue { seq: u64, tx: watch::Sender<Option<FetchResult<V>>>, rx: watch::Receiver<Option<FetchResult<V>>> },
}

impl<V, C> QueryCache<V, C>
where
    V: Send + Sync + 'static,
    C: Clock,
{
    /// Create a cache with an explicit clock (tests use [`MockClock`])
    ///
    /// [`MockClock`]: crate::clock::MockClock
    pub fn with_clock(config: QueryCacheConfig, clock: C) -> Self {
        Self {
            inner: Arc::new(Inner {
                storage: RwLock::new(Storage { entries: HashMap::new() }),
                config,
                metrics: MetricsCollector::new(),
                clock,
            }),
        }
    }

    /// Read the value for `key`, fetching it if the cache cannot serve it.
    ///
    /// - Fresh entry: returns the cached value, no fetcher call.
    /// - Fetch already in flight (and entry not stale): attaches to it and
    ///   resolves with that fetch's result — the dedup guarantee.
    /// - Otherwise issues the fetcher in a spawned task. A stale entry with a
    ///   fetch still in flight issues a *new* fetch; the superseded one is
    ///   discarded on completion by issue-order sequencing.
    pub async fn fetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<Arc<V>, QueryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, QueryError>> + Send + 'static,
    {
        let plan = {
            let mut storage = self.inner.storage_write();
            let entry = storage.entries.entry(key.clone()).or_insert_with(QueryEntry::new);

            if entry.is_fresh() {
                if let Some(data) = entry.data.clone() {
                    self.inner.metrics.record_hit();
                    return Ok(data);
                }
            }

            if !entry.stale {
                if let Some(rx) = entry.inflight.clone() {
                    self.inner.metrics.record_dedup();
                    trace!(key = %key, "attaching to in-flight fetch");
                    ReadPlan::Join(rx)
                } else {
                    self.issue(key, entry)
                }
            } else {
                self.issue(key, entry)
            }
        };

        match plan {
            ReadPlan::Join(rx) => Self::await_settled(rx).await,
            ReadPlan::Issue { seq, tx, rx } => {
                let fut = fetcher();
                let inner = Arc::clone(&self.inner);
                let key = key.clone();
                tokio::spawn(async move {
                    let result: FetchResult<V> = fut.await.map(Arc::new);
                    inner.apply(&key, seq, &result);
                    // Receivers may all be gone; the cache is already settled.
                    let _ = tx.send(Some(result));
                });
                Self::await_settled(rx).await
            }
        }
    }

    /// Force a revalidation of `key` even if the entry is fresh
    pub async fn refetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<Arc<V>, QueryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, QueryError>> + Send + 'static,
    {
        {
            let mut storage = self.inner.storage_write();
            if let Some(entry) = storage.entries.get_mut(key) {
                entry.stale = true;
            }
        }
        self.fetch(key, fetcher).await
    }

    /// Mark `key` stale: the next read for it revalidates instead of serving
    /// the cached value. Precise — no other key is affected.
    ///
    /// Returns `true` if an entry existed for the key.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let mut storage = self.inner.storage_write();
        match storage.entries.get_mut(key) {
            Some(entry) => {
                entry.stale = true;
                self.inner.metrics.record_invalidation();
                debug!(key = %key, "invalidated");
                true
            }
            None => false,
        }
    }

    /// Mark every key of a resource family stale (e.g. all `creators`
    /// filter variants). Returns the number of entries invalidated.
    pub fn invalidate_prefix(&self, resource: &str) -> usize {
        let mut storage = self.inner.storage_write();
        let mut count = 0;
        for (key, entry) in storage.entries.iter_mut() {
            if key.matches_prefix(resource) {
                entry.stale = true;
                self.inner.metrics.record_invalidation();
                count += 1;
            }
        }
        if count > 0 {
            debug!(resource, count, "prefix invalidated");
        }
        count
    }

    /// Run a mutation; on success apply its declared invalidations.
    ///
    /// Mutations hold no cache entry of their own — their only cache effect
    /// is the invalidation signal emitted here.
    pub async fn mutate<T, E, F, Fut>(&self, effects: Invalidations, op: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let result = op().await;
        if result.is_ok() {
            for key in &effects.keys {
                self.invalidate(key);
            }
            for prefix in &effects.prefixes {
                self.invalidate_prefix(prefix);
            }
        }
        result
    }

    /// Snapshot of `{data, is_loading, error}` for a key
    pub fn state(&self, key: &QueryKey) -> QueryState<V> {
        let storage = self.inner.storage_read();
        storage.entries.get(key).map(QueryEntry::snapshot).unwrap_or_default()
    }

    /// Register interest in a key; the entry is pinned against sweeping until
    /// the returned guard is dropped and the retention window elapses.
    pub fn subscribe(&self, key: &QueryKey) -> QuerySubscription<V, C> {
        let mut storage = self.inner.storage_write();
        let entry = storage.entries.entry(key.clone()).or_insert_with(QueryEntry::new);
        entry.subscribers += 1;
        entry.released_at = None;
        QuerySubscription { inner: Arc::clone(&self.inner), key: key.clone() }
    }

    /// Remove entries that have had zero subscribers for at least the
    /// retention window. Entries with a fetch in flight are never swept.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        let now = self.inner.clock.now();
        let retention = self.inner.config.retention;
        let mut storage = self.inner.storage_write();

        let expired: Vec<QueryKey> = storage
            .entries
            .iter()
            .filter(|(_, entry)| entry.subscribers == 0 && entry.inflight.is_none())
            .filter(|(_, entry)| {
                entry
                    .released_at
                    .or(entry.updated_at)
                    .is_some_and(|idle_since| now.duration_since(idle_since) >= retention)
            })
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            storage.entries.remove(key);
        }
        if !expired.is_empty() {
            self.inner.metrics.record_sweep(expired.len() as u64);
            debug!(removed = expired.len(), "swept unsubscribed entries");
        }
        expired.len()
    }

    /// Current number of entries
    pub fn len(&self) -> usize {
        self.inner.storage_read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.storage_read().entries.is_empty()
    }

    /// Drop all entries unconditionally
    pub fn clear(&self) {
        self.inner.storage_write().entries.clear();
    }

    /// Current statistics snapshot
    pub fn stats(&self) -> QueryStats {
        self.inner.metrics.snapshot(self.len())
    }

    /// Issue a new fetch sequence for the entry; caller spawns the fetcher.
    fn issue(&self, key: &QueryKey, entry: &mut QueryEntry<V>) -> ReadPlan<V> {
        entry.issued_seq += 1;
        let seq = entry.issued_seq;
        let (tx, rx) = watch::channel(None);
        entry.inflight = Some(rx.clone());
        entry.inflight_seq = seq;
        entry.status = QueryStatus::Pending;
        entry.stale = false;
        self.inner.metrics.record_miss();
        self.inner.metrics.record_fetch();
        trace!(key = %key, seq, "issuing fetch");
        ReadPlan::Issue { seq, tx, rx }
    }

    async fn await_settled(
        mut rx: watch::Receiver<Option<FetchResult<V>>>,
    ) -> Result<Arc<V>, QueryError> {
        loop {
            if let Some(result) = rx.borrow_and_update().clone() {
                return result;
            }
            if rx.changed().await.is_err() {
                return Err(QueryError::Aborted);
            }
        }
    }
}

/// Guard registering one subscriber on a key.
///
/// Dropping it decrements the subscriber count; when the count reaches zero
/// the retention window starts ticking for [`QueryCache::sweep`].
pub struct QuerySubscription<V, C = SystemClock>
where
    C: Clock,
{
    inner: Arc<Inner<V, C>>,
    key: QueryKey,
}

impl<V, C> QuerySubscription<V, C>
where
    C: Clock,
{
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl<V, C> Drop for QuerySubscription<V, C>
where
    C: Clock,
{
    fn drop(&mut self) {
        let mut storage = self.inner.storage_write();
        if let Some(entry) = storage.entries.get_mut(&self.key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
            if entry.subscribers == 0 {
                entry.released_at = Some(self.inner.clock.now());
            }
        }
    }
}
