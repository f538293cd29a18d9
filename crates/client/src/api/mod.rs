//! Typed API operations, grouped by backend resource

mod campaigns;
mod client;
mod contracts;
mod creators;
mod deals;
mod errors;
mod negotiations;
mod outreach;

pub use client::{ApiClient, ApiClientConfig};
pub use errors::ApiError;
