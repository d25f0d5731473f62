//! Paper data model matching Semantic Scholar API schema.

use serde::{Deserialize, Serialize};

use super::{AuthorRef, PublicationRecord};

/// A research paper from Semantic Scholar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Unique Semantic Scholar paper ID.
    pub paper_id: String,

    /// Paper title.
    #[serde(default)]
    pub title: Option<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// List of authors.
    #[serde(default)]
    pub authors: Vec<AuthorRef>,

    /// Publication venue (journal or conference).
    #[serde(default)]
    pub venue: Option<String>,
}

impl Paper {
    /// Convert into a publication record. Papers without a year have no place in a
    /// year window and yield `None`.
    #[must_use]
    pub fn into_publication(self) -> Option<PublicationRecord> {
        let year = self.year?;
        Some(PublicationRecord {
            title: self.title.unwrap_or_default(),
            venue: self.venue.filter(|v| !v.is_empty()),
            year,
            authors: self.authors.into_iter().filter_map(|a| a.name).collect(),
        })
    }
}

/// One page of an author's papers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorPapersResult {
    /// Offset for pagination.
    #[serde(default)]
    pub offset: i32,

    /// Next offset if more results.
    #[serde(default)]
    pub next: Option<i32>,

    /// List of papers.
    #[serde(default)]
    pub data: Vec<Paper>,
}
