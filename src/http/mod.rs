//! HTTP transport wrapper around reqwest.

mod client;

pub use client::{HttpClient, RawResponse};
