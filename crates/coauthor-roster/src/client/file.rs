//! Offline profile source backed by a JSON file.
//!
//! Accepted layouts:
//!
//! ```json
//! [{"title": "...", "year": 2023, "authors": ["Jane Doe", "Bob Lee"]}]
//! ```
//!
//! or, with collaborator affiliations:
//!
//! ```json
//! {
//!   "publications": [{"title": "...", "year": 2023, "authors": "Jane Doe and Bob Lee"}],
//!   "affiliations": {"Bob Lee": "MIT"}
//! }
//! ```
//!
//! Entries are read one at a time. An entry without a numeric year is dropped, and an
//! unusable `authors` value becomes an empty list that the aggregator reports as skipped.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{SourceError, SourceResult};
use crate::models::{PublicationRecord, YearRange};
use crate::name;
use crate::sources::ProfileSource;

#[derive(Deserialize)]
#[serde(untagged)]
enum FileLayout {
    Bare(Vec<Value>),
    Full {
        publications: Vec<Value>,
        #[serde(default)]
        affiliations: HashMap<String, String>,
    },
}

/// Publications and affiliations loaded from disk.
#[derive(Debug, Clone, Default)]
pub struct FileProfileSource {
    publications: Vec<PublicationRecord>,

    /// Affiliations keyed by normalized name.
    affiliations: HashMap<String, String>,
}

impl FileProfileSource {
    /// Load a source from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> SourceResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| SourceError::Io { path: path.display().to_string(), source })?;

        let layout: FileLayout = serde_json::from_str(&text)
            .map_err(|source| SourceError::Parse { path: path.display().to_string(), source })?;

        let source = match layout {
            FileLayout::Bare(entries) => Self::new(parse_entries(entries), HashMap::new()),
            FileLayout::Full { publications, affiliations } => {
                Self::new(parse_entries(publications), affiliations)
            }
        };

        tracing::debug!(
            path = %path.display(),
            publications = source.publications.len(),
            affiliations = source.affiliations.len(),
            "Loaded publications file"
        );

        Ok(source)
    }

    /// Build a source from in-memory data. Affiliation keys are raw names.
    #[must_use]
    pub fn new(
        publications: Vec<PublicationRecord>,
        affiliations: HashMap<String, String>,
    ) -> Self {
        let affiliations = affiliations
            .into_iter()
            .filter(|(_, affiliation)| !affiliation.trim().is_empty())
            .filter_map(|(raw, affiliation)| {
                name::normalize(&raw).map(|n| (n.key().to_string(), affiliation.trim().to_string()))
            })
            .collect();

        Self { publications, affiliations }
    }
}

/// Convert raw entries one at a time, dropping those that cannot be placed in a year window.
fn parse_entries(entries: Vec<Value>) -> Vec<PublicationRecord> {
    let mut publications = Vec::with_capacity(entries.len());
    let mut without_year = 0;

    for (index, entry) in entries.into_iter().enumerate() {
        if entry.get("year").and_then(Value::as_i64).is_none() {
            without_year += 1;
            continue;
        }

        match serde_json::from_value::<PublicationRecord>(entry) {
            Ok(publication) => publications.push(publication),
            Err(err) => {
                tracing::warn!(index, error = %err, "Ignored malformed publication entry");
            }
        }
    }

    if without_year > 0 {
        tracing::debug!(without_year, "Ignored publications without a year");
    }

    publications
}

#[async_trait::async_trait]
impl ProfileSource for FileProfileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn publications(
        &self,
        _author: &str,
        years: YearRange,
    ) -> SourceResult<Vec<PublicationRecord>> {
        let mut publications: Vec<_> =
            self.publications.iter().filter(|p| years.contains(p.year)).cloned().collect();
        publications.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(publications)
    }

    async fn affiliation(&self, collaborator: &str) -> SourceResult<Option<String>> {
        Ok(name::normalize(collaborator).and_then(|n| self.affiliations.get(n.key()).cloned()))
    }
}
