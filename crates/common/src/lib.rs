//! Shared async infrastructure for ReachKit crates.
//!
//! The main export is the [`cache`] module: a request-keyed query cache with
//! in-flight deduplication, stale-while-revalidate refetching, precise and
//! prefix invalidation, and subscriber-tracked garbage collection.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod cache;
pub mod clock;

pub use cache::{
    Invalidations, QueryCache, QueryCacheConfig, QueryError, QueryKey, QueryState, QueryStats,
    QueryStatus, QuerySubscription,
};
pub use clock::{Clock, MockClock, SystemClock};
