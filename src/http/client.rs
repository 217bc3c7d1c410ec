//! Authenticated HTTP transport: one request in, status and body text out.

use anyhow::{Context, Result};
use log::debug;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

/// Header carrying the VaultRE API key on every request.
const API_KEY_HEADER: &str = "X-Api-Key";

/// HTTP client that attaches the VaultRE credential headers and performs
/// exactly one request per call. No retries; transient faults are the
/// caller's to report.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    api_key: String,
    token: String,
}

/// Status code and raw body text of a completed exchange.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpClient {
    /// Creates a new transport wrapping the given reqwest Client.
    pub fn new(client: Client, api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            token: token.into(),
        }
    }

    /// Joins the base endpoint and a relative path into a full URL.
    pub fn build_url(endpoint: &str, path: &str) -> String {
        format!(
            "{}/{}",
            endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&self.api_key).context("Invalid API key header value")?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token))
                .context("Invalid auth token header value")?,
        );
        Ok(headers)
    }

    /// Sends one request and reads the response to completion.
    /// Any HTTP status is returned as-is; only network-level faults error.
    #[tracing::instrument(skip(self, body))]
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<RawResponse> {
        debug!("{} {}...", method, url);

        let mut request = self
            .client
            .request(method, url)
            .headers(self.auth_headers()?);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.context("Failed to send request")?;
        let status = response.status();

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        debug!("Response status {}", status);

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_url_joins_slashes() {
        assert_eq!(
            HttpClient::build_url("https://api.test/v1/", "/properties"),
            "https://api.test/v1/properties"
        );
        assert_eq!(
            HttpClient::build_url("https://api.test/v1", "properties"),
            "https://api.test/v1/properties"
        );
    }

    #[tokio::test]
    async fn test_send_attaches_credential_headers() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/properties")
            .match_header("x-api-key", "key-1")
            .match_header("authorization", "Bearer token-1")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = HttpClient::new(Client::new(), "key-1", "token-1");
        let url = HttpClient::build_url(&server.url(), "properties");
        let response = client.send(Method::GET, &url, None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "{}");
    }

    #[tokio::test]
    async fn test_send_forwards_json_body() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/properties")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(json!({"address": "1 Main St"})))
            .with_status(201)
            .with_body(r#"{"id": 7}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new(), "key", "token");
        let url = HttpClient::build_url(&server.url(), "properties");
        let payload = json!({"address": "1 Main St"});
        let response = client
            .send(Method::POST, &url, Some(&payload))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_send_returns_error_statuses_without_failing() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body(r#"{"msg": "not found"}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new(), "key", "token");
        let url = HttpClient::build_url(&server.url(), "missing");
        let response = client.send(Method::GET, &url, None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, r#"{"msg": "not found"}"#);
    }

    #[tokio::test]
    async fn test_send_fails_on_connection_error() {
        // Port 1 is reserved and nothing listens on it.
        let client = HttpClient::new(Client::new(), "key", "token");
        let result = client
            .send(Method::GET, "http://127.0.0.1:1/properties", None)
            .await;

        assert!(result.is_err());
    }
}
