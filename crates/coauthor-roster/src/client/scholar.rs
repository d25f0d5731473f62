//! Semantic Scholar as the profile source.

use std::collections::HashSet;

use reqwest::header::HeaderMap;

use super::HttpClient;
use crate::config::{Config, api, fields};
use crate::error::{ClientResult, SourceResult};
use crate::models::{Author, AuthorPapersResult, AuthorSearchResult, PublicationRecord, YearRange};
use crate::name;
use crate::sources::ProfileSource;

/// Semantic Scholar Graph API client.
#[derive(Clone)]
pub struct SemanticScholarClient {
    /// Shared HTTP plumbing.
    http: HttpClient,

    /// API key (optional).
    api_key: Option<String>,

    /// Graph API base URL.
    graph_api_url: String,
}

impl SemanticScholarClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(ref key) = config.api_key {
            headers.insert("x-api-key", key.parse()?);
        }

        Ok(Self {
            http: HttpClient::new(config, headers, config.rate_limit_delay)?,
            api_key: config.api_key.clone(),
            graph_api_url: config.graph_api_url.clone(),
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search for author profiles by name.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_authors(
        &self,
        query: &str,
        limit: u32,
    ) -> ClientResult<AuthorSearchResult> {
        let url = format!("{}/author/search", self.graph_api_url);

        let params = vec![
            ("query".to_string(), query.to_string()),
            ("limit".to_string(), limit.to_string()),
            ("fields".to_string(), fields::AUTHOR.join(",")),
        ];

        self.http.get(&url, &params).await
    }

    /// Get one page of an author's papers.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_author_papers(
        &self,
        author_id: &str,
        offset: i32,
        limit: u32,
    ) -> ClientResult<AuthorPapersResult> {
        let url = format!("{}/author/{}/papers", self.graph_api_url, author_id);

        let params = vec![
            ("offset".to_string(), offset.to_string()),
            ("limit".to_string(), limit.to_string()),
            ("fields".to_string(), fields::PAPER.join(",")),
        ];

        self.http.get(&url, &params).await
    }

    /// Profiles among the top search hits whose name normalizes to the same key as `name`.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn matching_profiles(&self, name: &str) -> ClientResult<Vec<Author>> {
        let Some(wanted) = name::normalize(name) else {
            return Ok(Vec::new());
        };

        let result = self.search_authors(name, api::PROFILE_SEARCH_LIMIT).await?;

        Ok(result
            .data
            .into_iter()
            .filter(|author| {
                author
                    .name
                    .as_deref()
                    .and_then(name::normalize)
                    .is_some_and(|found| found == wanted)
            })
            .collect())
    }

    /// Every paper of one profile, following pagination.
    async fn all_papers(
        &self,
        author_id: &str,
        seen: &mut HashSet<String>,
        years: YearRange,
        out: &mut Vec<PublicationRecord>,
    ) -> ClientResult<()> {
        let mut offset = 0;
        let mut without_year = 0;

        loop {
            let page = self.get_author_papers(author_id, offset, api::PAPERS_PAGE_SIZE).await?;
            if page.data.is_empty() {
                break;
            }

            for paper in page.data {
                if !seen.insert(paper.paper_id.clone()) {
                    continue;
                }
                match paper.into_publication() {
                    Some(publication) if years.contains(publication.year) => out.push(publication),
                    Some(_) => {}
                    None => without_year += 1,
                }
            }

            match page.next {
                Some(next) if next > offset => offset = next,
                _ => break,
            }
        }

        if without_year > 0 {
            tracing::debug!(author_id, without_year, "Ignored papers without a year");
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl ProfileSource for SemanticScholarClient {
    fn name(&self) -> &'static str {
        "semantic-scholar"
    }

    async fn publications(
        &self,
        author: &str,
        years: YearRange,
    ) -> SourceResult<Vec<PublicationRecord>> {
        let profiles = self.matching_profiles(author).await?;
        if profiles.is_empty() {
            tracing::warn!(author, "No author profile matches; roster will be empty");
            return Ok(Vec::new());
        }

        tracing::info!(author, profiles = profiles.len(), "Found matching profiles");

        let mut seen = HashSet::new();
        let mut publications = Vec::new();
        for profile in &profiles {
            self.all_papers(&profile.author_id, &mut seen, years, &mut publications).await?;
        }

        publications.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(publications)
    }

    async fn affiliation(&self, collaborator: &str) -> SourceResult<Option<String>> {
        let profiles = self.matching_profiles(collaborator).await?;
        Ok(profiles.iter().find_map(Author::primary_affiliation).map(String::from))
    }
}

impl std::fmt::Debug for SemanticScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScholarClient").field("has_api_key", &self.has_api_key()).finish()
    }
}
