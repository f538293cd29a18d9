//! Request-keyed query cache with dedup and stale-while-revalidate
//!
//! This module implements the data-fetching contract between UI-facing
//! callers and the API facade:
//!
//! - **Canonical keys**: a [`QueryKey`] identifies a cached request by
//!   resource name plus ordered parameters.
//! - **Dedup**: at most one in-flight fetch exists per key; concurrent
//!   callers of the same key share one network call and one result.
//! - **Stale-while-revalidate**: a refetch transitions the entry back to
//!   pending while retaining the previous value, so readers never observe an
//!   empty flash on revalidation.
//! - **Issue-order-wins**: completions are applied by issue order, never
//!   completion order; a slow, earlier-issued fetch cannot overwrite the
//!   result of a later one.
//! - **Invalidation**: precise per-key, or by resource prefix. Invalidation
//!   marks the entry stale; the next fetch revalidates it.
//! - **Garbage collection**: entries with no subscribers are swept once a
//!   retention window (measured against a [`Clock`]) elapses.
//!
//! # Example
//!
//! ```
//! use reachkit_common::cache::{QueryCache, QueryCacheConfig, QueryKey};
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache: QueryCache<String> = QueryCache::new(QueryCacheConfig::default());
//!     let key = QueryKey::new("campaigns");
//!
//!     let value = cache
//!         .fetch(&key, || async { Ok("summer launch".to_string()) })
//!         .await
//!         .expect("fetch");
//!     assert_eq!(*value, "summer launch");
//!
//!     // Served from cache: the fetcher is not called again.
//!     let again = cache.fetch(&key, || async { unreachable!() }).await.expect("cached");
//!     assert_eq!(*again, "summer launch");
//! }
//! ```
//!
//! [`Clock`]: crate::clock::Clock

mod entry;
mod key;
mod stats;
mod store;

pub use entry::{QueryError, QueryState, QueryStatus};
pub use key::QueryKey;
pub use stats::QueryStats;
pub use store::{Invalidations, QueryCache, QueryCacheConfig, QuerySubscription};
