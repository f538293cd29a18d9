//! # ReachKit Client
//!
//! Typed HTTP client and cached query facade for the ReachKit campaign API.
//!
//! Layers, bottom to top:
//! - [`http`]: thin reqwest wrapper with timeouts and opt-in retry
//! - [`api`]: per-resource typed operations and the transport error taxonomy
//! - [`queries`]: [`QueryClient`], which routes reads through the
//!   `reachkit-common` query cache and pairs mutations with invalidations
//! - [`config`]: environment-first configuration loading

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod api;
pub mod config;
pub mod http;
pub mod queries;

pub use api::{ApiClient, ApiClientConfig, ApiError};
pub use http::HttpClient;
pub use queries::{keys, QueryClient};
