//! Configuration for the collaborator roster.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Semantic Scholar Graph API endpoint.
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// ORCID public API endpoint.
    pub const ORCID_API: &str = "https://pub.orcid.org/v3.0";

    /// Base URL for ORCID record links.
    pub const ORCID_RECORD_URL: &str = "https://orcid.org";

    /// ORCID interactive search page, used for manual disambiguation.
    pub const ORCID_SEARCH_URL: &str = "https://orcid.org/orcid-search/search";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Upper bound on a single collaborator's registry lookup, retries included.
    pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(60);

    /// Delay between Semantic Scholar requests without API key (1s = 1 req/s).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(1);

    /// Delay between Semantic Scholar requests with API key (100ms = 10 req/s).
    pub const RATE_LIMIT_DELAY_WITH_KEY: Duration = Duration::from_millis(100);

    /// Delay between ORCID requests (ORCID public API allows 24 req/s).
    pub const ORCID_RATE_LIMIT_DELAY: Duration = Duration::from_millis(50);

    /// Cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cache size.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Maximum transient retries per request.
    pub const MAX_RETRIES: u32 = 3;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// Rows requested from the ORCID search; more than one already means ambiguous.
    pub const MAX_CANDIDATES: u32 = 20;

    /// How many top profile matches are inspected for a name.
    pub const PROFILE_SEARCH_LIMIT: u32 = 5;

    /// Page size when listing an author's papers.
    pub const PAPERS_PAGE_SIZE: u32 = 100;
}

/// Field sets for Semantic Scholar requests.
pub mod fields {
    /// Fields needed to aggregate co-authors from a paper.
    pub const PAPER: &[&str] = &["paperId", "title", "year", "venue", "authors"];

    /// Fields needed to match a profile and read its affiliation.
    pub const AUTHOR: &[&str] = &["authorId", "name", "affiliations"];
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional).
    pub api_key: Option<String>,

    /// Base URL for Graph API (for testing with mock servers).
    pub graph_api_url: String,

    /// Base URL for the ORCID public API (for testing with mock servers).
    pub orcid_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Per-collaborator registry lookup timeout.
    pub lookup_timeout: Duration,

    /// Minimum delay between Semantic Scholar requests.
    pub rate_limit_delay: Duration,

    /// Minimum delay between ORCID requests.
    pub orcid_rate_limit_delay: Duration,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,

    /// Maximum transient retries per request.
    pub max_retries: u32,

    /// Rows requested from the registry per name.
    pub max_candidates: u32,
}

impl Config {
    /// Create a new configuration with optional API key.
    ///
    /// The Semantic Scholar rate limit is adjusted based on API key presence:
    /// - Without key: 1 req/s
    /// - With key: 10 req/s
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        let has_key = api_key.is_some();
        Self {
            api_key,
            graph_api_url: api::GRAPH_API.to_string(),
            orcid_api_url: api::ORCID_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            lookup_timeout: api::LOOKUP_TIMEOUT,
            rate_limit_delay: if has_key {
                api::RATE_LIMIT_DELAY_WITH_KEY
            } else {
                api::RATE_LIMIT_DELAY
            },
            orcid_rate_limit_delay: api::ORCID_RATE_LIMIT_DELAY,
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
            max_retries: api::MAX_RETRIES,
            max_candidates: api::MAX_CANDIDATES,
        }
    }

    /// Create a test configuration with both APIs on one mock server.
    ///
    /// Semantic Scholar is served under `/graph/v1` and ORCID under `/orcid/v3.0`.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            graph_api_url: format!("{}/graph/v1", base_url),
            orcid_api_url: format!("{}/orcid/v3.0", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            lookup_timeout: Duration::from_secs(5),
            rate_limit_delay: Duration::ZERO, // No delay in tests
            orcid_rate_limit_delay: Duration::ZERO,
            cache_ttl: Duration::from_secs(0), // No caching in tests
            cache_max_size: 0,
            max_retries: 0,
            max_candidates: api::MAX_CANDIDATES,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `SEMANTIC_SCHOLAR_API_KEY` and, when set, `ORCID_API_URL` (useful for the
    /// ORCID sandbox).
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok();
        let mut config = Self::new(api_key);
        if let Ok(url) = std::env::var("ORCID_API_URL") {
            url::Url::parse(&url)?;
            config.orcid_api_url = url.trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    /// Override the per-lookup timeout.
    #[must_use]
    pub const fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(!config.has_api_key());
        assert_eq!(config.rate_limit_delay, api::RATE_LIMIT_DELAY);
    }

    #[test]
    fn test_config_with_api_key() {
        let config = Config::new(Some("test-key".to_string()));
        assert!(config.has_api_key());
        assert_eq!(config.rate_limit_delay, api::RATE_LIMIT_DELAY_WITH_KEY);
    }

    #[test]
    fn test_for_testing_routes_both_apis() {
        let config = Config::for_testing("http://127.0.0.1:9999");
        assert_eq!(config.graph_api_url, "http://127.0.0.1:9999/graph/v1");
        assert_eq!(config.orcid_api_url, "http://127.0.0.1:9999/orcid/v3.0");
        assert_eq!(config.max_retries, 0);
        assert!(config.rate_limit_delay.is_zero());
    }

    #[test]
    fn test_fields() {
        assert!(fields::PAPER.contains(&"authors"));
        assert!(fields::PAPER.contains(&"year"));
        assert!(fields::AUTHOR.contains(&"affiliations"));
    }
}
