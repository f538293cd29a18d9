//! Core API client: URL joining, request execution, response decoding

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use reachkit_domain::{config::DEFAULT_BASE_URL, Config, HealthStatus};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for [`ApiClient`]
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL prepended to every path (e.g. "http://localhost:8000/api")
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Total attempts per request (1 = no retries)
    pub max_attempts: usize,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_attempts: 1,
        }
    }
}

impl From<&Config> for ApiClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            timeout: Duration::from_secs(config.api.timeout_seconds),
            max_attempts: config.api.max_attempts,
        }
    }
}

/// Typed client for the ReachKit campaign API.
///
/// One method per backend operation, grouped by resource in the sibling
/// modules. All methods return [`ApiError`] on failure; none retry silently.
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .build()?;

        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// Base URL this client joins paths against (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check backend health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        self.get("/health").await
    }

    /// Generic request escape hatch for endpoints without a typed method.
    ///
    /// A JSON body attaches `Content-Type: application/json`; caller headers
    /// are applied last, so a caller overriding a header does so
    /// intentionally.
    #[instrument(skip(self, body, headers), fields(path = %path))]
    pub async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        headers: Option<reqwest::header::HeaderMap>,
    ) -> Result<R, ApiError> {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        if let Some(headers) = headers {
            builder = builder.headers(headers);
        }
        let response = self.http.send(builder).await?;
        Self::decode(path, response).await
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self), fields(path = %path))]
    pub(crate) async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.http.request(Method::GET, self.url(path));
        let response = self.http.send(request).await?;
        Self::decode(path, response).await
    }

    #[instrument(skip(self, query), fields(path = %path))]
    pub(crate) async fn get_with_query<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<R, ApiError> {
        let request = self.http.request(Method::GET, self.url(path)).query(query);
        let response = self.http.send(request).await?;
        Self::decode(path, response).await
    }

    #[instrument(skip(self, body), fields(path = %path))]
    pub(crate) async fn post<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let request = self.http.request(Method::POST, self.url(path)).json(body);
        let response = self.http.send(request).await?;
        Self::decode(path, response).await
    }

    #[instrument(skip(self, query, body), fields(path = %path))]
    pub(crate) async fn post_with_query<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &T,
    ) -> Result<R, ApiError> {
        let request = self.http.request(Method::POST, self.url(path)).query(query).json(body);
        let response = self.http.send(request).await?;
        Self::decode(path, response).await
    }

    /// POST without a request body (action endpoints)
    #[instrument(skip(self), fields(path = %path))]
    pub(crate) async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.http.request(Method::POST, self.url(path));
        let response = self.http.send(request).await?;
        Self::decode(path, response).await
    }

    /// POST a multipart form. Multipart bodies stream, so this never retries.
    #[instrument(skip(self, form), fields(path = %path))]
    pub(crate) async fn post_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<R, ApiError> {
        let request = self.http.request(Method::POST, self.url(path)).multipart(form);
        let response = self.http.send_once(request).await?;
        Self::decode(path, response).await
    }

    #[instrument(skip(self), fields(path = %path))]
    pub(crate) async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.http.request(Method::DELETE, self.url(path));
        let response = self.http.send(request).await?;
        Self::decode(path, response).await
    }

    /// Map a response to a typed value.
    ///
    /// Non-success statuses become [`ApiError::Http`] carrying the parsed
    /// JSON body when there is one. 204/205 decode from `null`, so `()` and
    /// `Option<T>` targets work for bodyless responses.
    async fn decode<R: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<R, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let payload = serde_json::from_str(&body).ok();
            warn!(path = %path, status = status.as_u16(), "API request failed");
            return Err(ApiError::Http { status: status.as_u16(), payload });
        }

        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "no-content response ({}) cannot produce the expected type",
                    status.as_u16()
                ))
            });
        }

        let body =
            response.text().await.map_err(|err| ApiError::Network(err.to_string()))?;
        let value = serde_json::from_str(&body)
            .map_err(|err| ApiError::Decode(format!("{path}: {err}")))?;

        debug!(path = %path, status = status.as_u16(), "API request succeeded");
        Ok(value)
    }
}
