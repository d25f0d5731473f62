//! Output formatting: deterministic row ordering plus table, CSV and JSON renderers.

pub mod csv;
pub mod json;
pub mod table;

use serde::Serialize;

use crate::config::api;
use crate::models::{CollaboratorRecord, IdentifierResult};

/// One roster line, shared by every renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    /// Display name (first raw form observed).
    pub name: String,
    /// Affiliation, empty if unknown.
    pub affiliation: String,
    /// Registry identifier, empty unless uniquely resolved.
    pub identifier: String,
    /// "First Last" query when the registry returned several candidates.
    pub disambiguation_query: String,
    /// `unique`, `ambiguous`, `none`, or `unresolved` when no lookup ran.
    pub status: String,
    /// Years of co-authorship, ascending.
    pub years: Vec<i32>,
    /// Number of shared publications.
    pub publications: usize,
    /// Registry record for a unique match, registry search page otherwise.
    pub lookup_url: String,
}

impl OutputRow {
    /// Build a row from an enriched record.
    #[must_use]
    pub fn from_record(record: &CollaboratorRecord) -> Self {
        let identifier = record.identifier();
        let lookup_url = match identifier.and_then(IdentifierResult::identifier) {
            Some(id) => orcid_record_url(id),
            None => orcid_search_url(&record.name.lookup_query()),
        };

        Self {
            name: record.display_name.clone(),
            affiliation: record.affiliation.clone().unwrap_or_default(),
            identifier: identifier.and_then(|r| r.identifier()).unwrap_or_default().to_string(),
            disambiguation_query: identifier
                .and_then(|r| r.disambiguation_query())
                .unwrap_or_default()
                .to_string(),
            status: identifier.map_or("unresolved", |r| r.status()).to_string(),
            years: record.years.iter().copied().collect(),
            publications: record.publication_count(),
            lookup_url,
        }
    }

    /// Years as `"2022, 2023"`.
    #[must_use]
    pub fn years_label(&self) -> String {
        self.years.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    }
}

/// Order records for output.
///
/// Rows are sorted by case-folded display name, then by exact display name, then by
/// normalized key, so the same input always renders identically regardless of discovery order.
#[must_use]
pub fn format<'a, I>(records: I) -> Vec<OutputRow>
where
    I: IntoIterator<Item = &'a CollaboratorRecord>,
{
    let mut sorted: Vec<&CollaboratorRecord> = records.into_iter().collect();
    sorted.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
            .then_with(|| a.display_name.cmp(&b.display_name))
            .then_with(|| a.name.key().cmp(b.name.key()))
    });
    sorted.into_iter().map(OutputRow::from_record).collect()
}

/// Public ORCID record URL for an iD.
#[must_use]
pub fn orcid_record_url(identifier: &str) -> String {
    format!("{}/{}", api::ORCID_RECORD_URL, identifier)
}

/// ORCID search page pre-filled with a name query.
#[must_use]
pub fn orcid_search_url(query: &str) -> String {
    url::Url::parse_with_params(api::ORCID_SEARCH_URL, &[("searchQuery", query)])
        .map(String::from)
        .unwrap_or_else(|_| api::ORCID_SEARCH_URL.to_string())
}
