//! The VaultRE client: fluent configuration, action dispatch, and result
//! accessors.
//!
//! One `Client` is built per credential pair and reused across calls.
//! Configuration persists between calls; the recorded error and response
//! are reset by each action. Actions take `&mut self`, so a single
//! instance cannot be shared across concurrent requests.

use log::debug;
use serde_json::Value;

use crate::action::Action;
use crate::http::{HttpClient, RawResponse};
use crate::response::{ApiResponse, Pagination};

/// Production VaultRE endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://ap-southeast-2.api.vaultre.com.au/api/v1.3/";

/// Page size sent when the caller has not chosen one.
const DEFAULT_PAGE_SIZE: u32 = 100;

/// Client for the VaultRE REST API.
///
/// Failures of a call are not returned from the action methods; they are
/// recorded on the client and must be read back through [`Client::is_success`]
/// and [`Client::errors`], which keeps a fluent call chain from being
/// interrupted mid-way.
pub struct Client {
    http: HttpClient,
    endpoint: String,
    resource: Option<String>,
    page_size: u32,
    page: u32,
    debug: bool,
    response: ApiResponse,
    error: Option<String>,
}

impl Client {
    /// Creates a client for the production endpoint.
    pub fn new(api_key: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, auth_token, DEFAULT_ENDPOINT)
    }

    /// Creates a client against a custom base endpoint.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        auth_token: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            http: HttpClient::new(reqwest::Client::new(), api_key, auth_token),
            endpoint: endpoint.into(),
            resource: None,
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
            debug: false,
            response: ApiResponse::default(),
            error: None,
        }
    }

    /// Selects the collection the next call targets, e.g. "properties/sale".
    /// Stored verbatim; escaping is the caller's responsibility.
    pub fn set_resource(&mut self, resource: impl Into<String>) -> &mut Self {
        self.resource = Some(resource.into());
        self
    }

    /// Sets how many items a single call retrieves. No upper bound is
    /// enforced here; the upstream API may reject large values.
    pub fn set_page_size(&mut self, page_size: u32) -> &mut Self {
        self.page_size = page_size;
        self
    }

    /// Selects which page of results to request (1-based).
    pub fn set_page(&mut self, page: u32) -> &mut Self {
        self.page = page;
        self
    }

    /// Turns on logging of composed requests and response bodies.
    pub fn enable_debug(&mut self) -> &mut Self {
        self.debug = true;
        self
    }

    /// Turns off verbose logging.
    pub fn disable_debug(&mut self) -> &mut Self {
        self.debug = false;
        self
    }

    /// GET the configured resource.
    pub async fn fetch(&mut self, sub_path: Option<&str>, body: Option<&Value>) -> &mut Self {
        self.perform(Action::Fetch, sub_path, body).await
    }

    /// POST to the configured resource.
    pub async fn add(&mut self, sub_path: Option<&str>, body: Option<&Value>) -> &mut Self {
        self.perform(Action::Add, sub_path, body).await
    }

    /// PUT to the configured resource.
    pub async fn update(&mut self, sub_path: Option<&str>, body: Option<&Value>) -> &mut Self {
        self.perform(Action::Update, sub_path, body).await
    }

    /// DELETE on the configured resource.
    pub async fn delete(&mut self, sub_path: Option<&str>, body: Option<&Value>) -> &mut Self {
        self.perform(Action::Delete, sub_path, body).await
    }

    /// Runs one action: composes the URL from the current configuration,
    /// sends exactly one request, and records the outcome on the client.
    /// The previous response is kept when the call fails.
    pub async fn perform(
        &mut self,
        action: Action,
        sub_path: Option<&str>,
        body: Option<&Value>,
    ) -> &mut Self {
        self.error = None;

        match self.execute(action, sub_path, body).await {
            Ok(response) => self.response = response,
            Err(message) => self.error = Some(message),
        }

        self
    }

    async fn execute(
        &self,
        action: Action,
        sub_path: Option<&str>,
        body: Option<&Value>,
    ) -> Result<ApiResponse, String> {
        let resource = self
            .resource
            .as_deref()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| format_error(0, "Missing critical URL component."))?;

        let mut path = resource.to_string();
        if let Some(sub) = sub_path {
            path.push('/');
            path.push_str(sub);
        }

        let separator = if path.contains('?') { '&' } else { '?' };
        path.push_str(&format!(
            "{}pageSize={}&page={}",
            separator, self.page_size, self.page
        ));

        let url = HttpClient::build_url(&self.endpoint, &path);

        if self.debug {
            debug!("{} {} body={:?}", action, url, body);
        }

        let raw = self
            .http
            .send(action.verb(), &url, body)
            .await
            .map_err(|e| format_error(0, &format!("{:#}", e)))?;

        if self.debug {
            debug!("Response body: {}", raw.body);
        }

        if raw.status.is_success() {
            decode_body(&raw.body)
        } else {
            Err(format_error(raw.status.as_u16(), &upstream_message(&raw)))
        }
    }

    /// True iff the last call recorded no error.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// The recorded error string, empty when the last call succeeded.
    pub fn errors(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }

    /// Items of the last response, empty when it carried none.
    pub fn properties(&self) -> &[Value] {
        self.response.items.as_deref().unwrap_or(&[])
    }

    /// Pagination state of the last response, `None` when it was not a
    /// paged collection.
    pub fn pagination(&self) -> Option<Pagination> {
        self.response.pagination()
    }

    /// The full decoded envelope of the last response.
    pub fn raw_response(&self) -> &ApiResponse {
        &self.response
    }
}

fn format_error(code: u16, message: &str) -> String {
    format!("Error {} - {}", code, message)
}

/// Decodes a successful body. An empty body (some write endpoints return
/// nothing) counts as an empty envelope rather than a decode failure.
fn decode_body(body: &str) -> Result<ApiResponse, String> {
    if body.trim().is_empty() {
        return Ok(ApiResponse::default());
    }

    serde_json::from_str(body)
        .map_err(|e| format_error(0, &format!("Failed to decode response body: {}", e)))
}

/// Best error message available for a non-2xx response: the body's `msg`
/// field, else the raw body text, else the status reason.
fn upstream_message(raw: &RawResponse) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(&raw.body) {
        if let Some(msg) = value.get("msg").and_then(Value::as_str) {
            return msg.to_string();
        }
    }

    let trimmed = raw.body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    raw.status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}
