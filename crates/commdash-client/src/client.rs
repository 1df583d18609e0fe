//! Wrapped HTTP calls against the commission backend.

use std::time::Instant;

use commdash_core::{ApiEnvelope, CommissionRecord, CommissionSummary};
use commdash_telemetry::Metrics;
use commdash_ui::{ConnectionIndicator, LoadingTracker, Notifier, UiContext};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

pub(crate) const SUMMARY_PATH: &str = "/api/commission-summary";
pub(crate) const DATA_PATH: &str = "/api/commission-data";

/// Per-call request settings.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Merged over `Content-Type: application/json`; these win on conflict.
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Default::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// HTTP client that drives the loading overlay, connection badge and error
/// notifications.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    loading: LoadingTracker,
    indicator: ConnectionIndicator,
    notifier: Notifier,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, ui: &UiContext) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            loading: ui.loading().clone(),
            indicator: ui.indicator().clone(),
            notifier: ui.notifier().clone(),
        })
    }

    /// Issue a request and decode the JSON body.
    ///
    /// The loading overlay is held until this returns. On failure the badge
    /// is set disconnected and one error notification is shown before the
    /// error is returned; on success the badge is set connected.
    pub async fn call<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let _loading = self.loading.begin();
        let method = options.method.clone();
        let started = Instant::now();

        let result = self.execute(url, options).await;
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(body) => {
                debug!(%method, url, latency_ms, "API call succeeded");
                Metrics::api_request(method.as_str(), "success", latency_ms);
                self.indicator.set_connected(true);
                Ok(body)
            }
            Err(e) => {
                error!(%method, url, error = %e, "API call failed");
                Metrics::api_request(method.as_str(), e.outcome(), latency_ms);
                self.indicator.set_connected(false);
                self.notifier.error(format!("Connection error: {e}"));
                Err(e)
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.call(url, RequestOptions::get()).await
    }

    /// Commission totals from `/api/commission-summary`.
    pub async fn commission_summary(&self) -> ApiResult<CommissionSummary> {
        let envelope: ApiEnvelope<CommissionSummary> = self.get(SUMMARY_PATH).await?;
        Ok(envelope.into_summary()?)
    }

    /// Grouped commission rows from `/api/commission-data`.
    pub async fn commission_data(&self) -> ApiResult<Vec<CommissionRecord>> {
        let envelope: ApiEnvelope<Vec<CommissionRecord>> = self.get(DATA_PATH).await?;
        Ok(envelope.into_data()?)
    }

    /// Commission rows as untyped records, in the server's column order.
    pub async fn commission_rows(&self) -> ApiResult<Vec<Map<String, Value>>> {
        let envelope: ApiEnvelope<Vec<Map<String, Value>>> = self.get(DATA_PATH).await?;
        Ok(envelope.into_data()?)
    }

    /// Absolute URLs pass through; paths are joined to the base URL.
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{url}", self.base_url)
        } else {
            format!("{}/{url}", self.base_url)
        }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn indicator(&self) -> &ConnectionIndicator {
        &self.indicator
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let headers = merge_headers(&options.headers)?;
        let mut request = self
            .http
            .request(options.method, self.resolve(url))
            .headers(headers);
        if let Some(body) = &options.body {
            let bytes =
                serde_json::to_vec(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
            request = request.body(bytes);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn merge_headers(overrides: &[(String, String)]) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in overrides {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::InvalidRequest(format!("header {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::InvalidRequest(format!("header {name}: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}
