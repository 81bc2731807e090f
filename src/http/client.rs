use crate::config::ApiKey;
use crate::errors::{HeatmapError, HeatmapResult};
use crate::rate_limiter::RateLimiter;
use anyhow::Context;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-riot-token";

/// HTTP client with built-in rate limiting and provider authentication
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(
        user_agent: &str,
        timeout_secs: u64,
        rate_limit_ms: u64,
        api_key: &ApiKey,
    ) -> anyhow::Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs, api_key)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// GET `url` and decode a JSON body, mapping HTTP failures to provider errors
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> HeatmapResult<T> {
        self.rate_limiter.wait().await;
        let response = self.send_get_request(url).await?;
        let response = check_status(response, url)?;

        response
            .json::<T>()
            .await
            .map_err(|e| HeatmapError::provider(format!("Failed to decode response from {}: {}", url, e)))
    }

    fn build_client(user_agent: &str, timeout_secs: u64, api_key: &ApiKey) -> anyhow::Result<Client> {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(api_key.expose()).context("API key is not a valid header value")?;
        token.set_sensitive(true);
        headers.insert(API_KEY_HEADER, token);

        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> HeatmapResult<reqwest::Response> {
        debug!("GET {}", url);
        self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                HeatmapError::provider(format!("Request to {} timed out", url))
            } else {
                HeatmapError::provider(format!("Failed to send GET request to {}: {}", url, e))
            }
        })
    }
}

fn check_status(response: reqwest::Response, url: &str) -> HeatmapResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let retry_after = parse_retry_after(response.headers());
    Err(classify_status(status, retry_after, url))
}

/// Map a non-success status onto the error taxonomy
pub fn classify_status(status: StatusCode, retry_after: Option<Duration>, url: &str) -> HeatmapError {
    match status {
        StatusCode::NOT_FOUND => HeatmapError::NotFound(format!("{} returned 404", url)),
        StatusCode::TOO_MANY_REQUESTS => HeatmapError::RateLimited { retry_after },
        other => HeatmapError::provider(format!("API returned status {} for {}", other, url)),
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
