use crate::utils::error::{Result, SiteError};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Per-call options; `Default` gives a bare GET with no extra headers.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub method: Option<Method>,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl FetchOptions {
    pub fn post(body: serde_json::Value) -> Self {
        Self {
            method: Some(Method::POST),
            headers: HeaderMap::new(),
            body: Some(body),
        }
    }
}

/// Normalized response body of a content API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    /// HTTP 204, no content regardless of what was on the wire.
    Empty,
    /// Parsed body of a `application/json` response.
    Json(serde_json::Value),
    /// Raw body of any other content type.
    Text(String),
}

/// Thin wrapper around `reqwest` used by every content accessor: composes
/// `base_url + endpoint`, enforces a per-attempt timeout and retries
/// transient (5xx) API errors a bounded number of times with a fixed delay.
///
/// Stateless across calls: no response cache, no in-flight deduplication.
/// Connection pooling stays inside the underlying `reqwest::Client`.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    retries: u32,
    retry_delay: Duration,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            client: Client::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues the request, retrying transient failures. Only typed API errors
    /// with status >= 500 consume retry budget; timeouts, 4xx responses and
    /// raw transport errors propagate on the first failure.
    pub async fn fetch(&self, endpoint: &str, options: &FetchOptions) -> Result<ApiBody> {
        let mut retries_left = self.retries;

        loop {
            match self.attempt(endpoint, options).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_transient() && retries_left > 0 => {
                    retries_left -= 1;
                    tracing::warn!(
                        "Transient failure on {}: {} (retrying in {:?}, {} left)",
                        endpoint,
                        err,
                        self.retry_delay,
                        retries_left
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    pub async fn get(&self, endpoint: &str) -> Result<ApiBody> {
        self.fetch(endpoint, &FetchOptions::default()).await
    }

    /// GET an endpoint and deserialize its JSON body. A 204 deserializes from
    /// JSON null, so `Option<T>` callers see `None`; callers expecting a list
    /// get a `SerializationError` instead of a silently empty `Vec`.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        match self.get(endpoint).await? {
            ApiBody::Json(value) => Ok(serde_json::from_value(value)?),
            ApiBody::Empty => Ok(serde_json::from_value(serde_json::Value::Null)?),
            ApiBody::Text(_) => Err(SiteError::PayloadError {
                message: format!("expected JSON from {}", endpoint),
            }),
        }
    }

    async fn attempt(&self, endpoint: &str, options: &FetchOptions) -> Result<ApiBody> {
        // Exact concatenation: slashes in base_url and endpoint are the
        // caller's responsibility and are never normalized away.
        let url = format!("{}{}", self.base_url, endpoint);
        let method = options.method.clone().unwrap_or(Method::GET);

        tracing::debug!("{} {}", method, url);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in options.headers.iter() {
            headers.insert(name, value.clone());
        }

        let mut request = self.client.request(method, &url).headers(headers);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &options.body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = match tokio::time::timeout(self.timeout, request.send()).await {
            Ok(sent) => sent?,
            Err(_) => {
                tracing::warn!("Request to {} timed out after {:?}", url, self.timeout);
                return Err(SiteError::Timeout);
            }
        };

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(SiteError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(ApiBody::Empty);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);

        if is_json {
            Ok(ApiBody::Json(response.json().await?))
        } else {
            Ok(ApiBody::Text(response.text().await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(server.base_url()).with_retry_delay(Duration::from_millis(20))
    }

    #[tokio::test]
    async fn default_content_type_is_sent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/news")
                .header("Content-Type", "application/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([]));
        });

        let body = client(&server).get("/news").await.unwrap();

        mock.assert();
        assert_eq!(body, ApiBody::Json(serde_json::json!([])));
    }

    #[tokio::test]
    async fn caller_headers_override_defaults() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/raw")
                .header("Content-Type", "text/plain");
            then.status(200).body("ok");
        });

        let mut options = FetchOptions::default();
        options
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let body = client(&server).fetch("/raw", &options).await.unwrap();

        mock.assert();
        assert_eq!(body, ApiBody::Text("ok".to_string()));
    }

    #[tokio::test]
    async fn bearer_token_is_attached_when_configured() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/news")
                .header("Authorization", "Bearer sekret");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([]));
        });

        let api = client(&server).with_token("sekret");
        api.get("/news").await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn post_body_is_serialized_json() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/contact")
                .json_body(serde_json::json!({"name": "Alex"}));
            then.status(204);
        });

        let options = FetchOptions::post(serde_json::json!({"name": "Alex"}));
        let body = client(&server).fetch("/contact", &options).await.unwrap();

        mock.assert();
        assert_eq!(body, ApiBody::Empty);
    }

    #[tokio::test]
    async fn get_json_deserializes_into_target_type() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/numbers");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([1, 2, 3]));
        });

        let numbers: Vec<u32> = client(&server).get_json("/numbers").await.unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn get_json_maps_204_to_none_for_optional_targets() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/maybe");
            then.status(204);
        });

        let entry: Option<serde_json::Value> = client(&server).get_json("/maybe").await.unwrap();
        assert!(entry.is_none());
    }

    #[tokio::test]
    async fn get_json_refuses_204_for_list_targets() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/listing");
            then.status(204);
        });

        // No body is not an empty list: the null payload fails to
        // deserialize rather than being coerced to vec![].
        let result = client(&server).get_json::<Vec<u32>>("/listing").await;
        assert!(matches!(result, Err(SiteError::SerializationError(_))));
    }

    #[tokio::test]
    async fn get_json_rejects_non_json_payloads() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/page");
            then.status(200)
                .header("Content-Type", "text/html")
                .body("<html></html>");
        });

        let result = client(&server).get_json::<serde_json::Value>("/page").await;
        assert!(matches!(result, Err(SiteError::PayloadError { .. })));
    }
}
