//! Typed view of the JSON envelope the API returns.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Decoded response body of the last successful call.
///
/// The fields the API documents are typed; everything else the upstream
/// sends is preserved in `extra`, so the full mapping stays available.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    pub items: Option<Vec<Value>>,
    #[serde(rename = "totalItems")]
    pub total_items: Option<u64>,
    #[serde(rename = "totalPages")]
    pub total_pages: Option<u64>,
    pub urls: Option<PageLinks>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResponse {
    /// Pagination summary, present when the response carried `totalItems`.
    pub fn pagination(&self) -> Option<Pagination> {
        self.total_items.map(|total_items| Pagination {
            total_items,
            total_pages: self.total_pages.unwrap_or(0),
            links: self.urls.clone(),
        })
    }
}

/// Navigation links sent alongside a paged collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageLinks {
    #[serde(rename = "self")]
    pub current: Option<String>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// Pagination state derived from the last response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub total_items: u64,
    pub total_pages: u64,
    pub links: Option<PageLinks>,
}
