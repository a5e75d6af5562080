pub mod cache;
pub mod client;

pub use client::{ApiBody, ApiClient, FetchOptions};
