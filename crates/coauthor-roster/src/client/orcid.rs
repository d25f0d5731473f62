//! ORCID public API as the identifier registry.

use reqwest::header::HeaderMap;

use super::HttpClient;
use crate::config::Config;
use crate::error::ClientResult;
use crate::models::{Candidate, ExpandedSearchResult};
use crate::sources::IdentifierRegistry;

/// ORCID public API client.
#[derive(Clone)]
pub struct OrcidClient {
    /// Shared HTTP plumbing.
    http: HttpClient,

    /// API base URL (e.g., `https://pub.orcid.org/v3.0`).
    api_url: String,

    /// Rows requested per search.
    max_candidates: u32,
}

impl OrcidClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpClient::new(config, HeaderMap::new(), config.orcid_rate_limit_delay)?,
            api_url: config.orcid_api_url.clone(),
            max_candidates: config.max_candidates,
        })
    }

    /// Run an expanded search with a raw Solr query.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn expanded_search(&self, query: &str) -> ClientResult<ExpandedSearchResult> {
        let url = format!("{}/expanded-search/", self.api_url);
        let params = vec![
            ("q".to_string(), query.to_string()),
            ("rows".to_string(), self.max_candidates.to_string()),
        ];

        self.http.get(&url, &params).await
    }
}

/// Solr query matching given and family names exactly.
///
/// An empty given name searches by family name only.
#[must_use]
pub fn name_query(first_name: &str, last_name: &str) -> String {
    if first_name.is_empty() {
        format!("family-name:{}", quote(last_name))
    } else {
        format!("given-names:{} AND family-name:{}", quote(first_name), quote(last_name))
    }
}

fn quote(term: &str) -> String {
    format!("\"{}\"", term.replace('\\', "\\\\").replace('"', "\\\""))
}

#[async_trait::async_trait]
impl IdentifierRegistry for OrcidClient {
    fn name(&self) -> &'static str {
        "orcid"
    }

    async fn search(&self, first_name: &str, last_name: &str) -> ClientResult<Vec<Candidate>> {
        let result = self.expanded_search(&name_query(first_name, last_name)).await?;

        if result.num_found > result.records().len() as u64 {
            tracing::debug!(
                first_name,
                last_name,
                found = result.num_found,
                returned = result.records().len(),
                "ORCID search truncated"
            );
        }

        Ok(result.records().iter().filter_map(|r| r.to_candidate()).collect())
    }
}

impl std::fmt::Debug for OrcidClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrcidClient").field("api_url", &self.api_url).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_query() {
        assert_eq!(name_query("Bob", "Lee"), r#"given-names:"Bob" AND family-name:"Lee""#);
        assert_eq!(name_query("", "Plato"), r#"family-name:"Plato""#);
    }

    #[test]
    fn test_name_query_escapes_quotes() {
        assert_eq!(name_query("A\"B", "C"), r#"given-names:"A\"B" AND family-name:"C""#);
    }
}
