//! API clients for the profile source and the identifier registry.
//!
//! Both HTTP clients share one plumbing layer:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff on transient failures
//! - Request pacing with a `governor` rate limiter
//! - GET response caching with a TTL

mod file;
mod orcid;
mod scholar;

pub use file::FileProfileSource;
pub use orcid::OrcidClient;
pub use scholar::SemanticScholarClient;

use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use moka::future::Cache;
use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};

/// JSON-over-HTTP client with retry, pacing and caching.
#[derive(Clone)]
pub(crate) struct HttpClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Response cache.
    cache: Cache<String, serde_json::Value>,

    /// Request pacing; `None` when the configured delay is zero.
    limiter: Option<Arc<DefaultDirectRateLimiter>>,

    /// Request timeout, reported on timeouts.
    request_timeout: Duration,
}

impl HttpClient {
    /// Create a client sending `extra_headers` on every request.
    pub(crate) fn new(
        config: &Config,
        mut extra_headers: HeaderMap,
        rate_limit_delay: Duration,
    ) -> anyhow::Result<Self> {
        extra_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(extra_headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let cache = Cache::builder()
            .max_capacity(config.cache_max_size)
            .time_to_live(config.cache_ttl)
            .build();

        let limiter =
            Quota::with_period(rate_limit_delay).map(|quota| Arc::new(RateLimiter::direct(quota)));

        Ok(Self { client, cache, limiter, request_timeout: config.request_timeout })
    }

    /// Make a GET request and decode the JSON body.
    pub(crate) async fn get<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let cache_key = Self::cache_key("GET", url, params);
        if let Some(cached) = self.cache.get(&cache_key).await {
            return serde_json::from_value(cached).map_err(ClientError::from);
        }

        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }

        tracing::debug!(url, "GET");

        let response = match self.client.get(url).query(params).send().await {
            Ok(response) => response,
            Err(reqwest_middleware::Error::Reqwest(err)) if err.is_timeout() => {
                return Err(ClientError::Timeout(self.request_timeout));
            }
            Err(err) => return Err(err.into()),
        };

        let response = Self::handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        self.cache.insert(cache_key, value.clone()).await;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }

    /// Generate cache key.
    fn cache_key(method: &str, url: &str, params: &[(String, String)]) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(method.as_bytes());
        hasher.update(b"|");
        hasher.update(url.as_bytes());
        hasher.update(b"|");

        for (k, v) in params {
            hasher.update(k.as_bytes());
            hasher.update(b"=");
            hasher.update(v.as_bytes());
            hasher.update(b"&");
        }

        format!("{:x}", hasher.finalize())
    }
}
