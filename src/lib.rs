//! Client library for the VaultRE real-estate CRM REST API.
//!
//! Configure a [`Client`] with an API key and bearer token, point it at a
//! resource, run one of the four actions (fetch, add, update, delete), then
//! read the decoded response or the recorded error from the client.

pub mod action;
pub mod client;
pub mod http;
pub mod response;

pub use action::{Action, UnknownAction};
pub use client::{Client, DEFAULT_ENDPOINT};
pub use response::{ApiResponse, PageLinks, Pagination};
