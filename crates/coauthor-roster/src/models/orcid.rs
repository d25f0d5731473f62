//! ORCID public API `expanded-search` response model.

use serde::{Deserialize, Serialize};

use super::Candidate;

/// Response of `GET /v3.0/expanded-search/?q=...`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpandedSearchResult {
    /// Matching records. ORCID sends `null` when nothing matched.
    #[serde(rename = "expanded-result", default)]
    pub expanded_result: Option<Vec<ExpandedRecord>>,

    /// Total number of matches, which can exceed the rows returned.
    #[serde(rename = "num-found", default)]
    pub num_found: u64,
}

impl ExpandedSearchResult {
    /// Records returned, empty when ORCID sent `null`.
    #[must_use]
    pub fn records(&self) -> &[ExpandedRecord] {
        self.expanded_result.as_deref().unwrap_or_default()
    }
}

/// One ORCID record in an expanded search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExpandedRecord {
    /// ORCID iD.
    #[serde(default)]
    pub orcid_id: String,

    /// Given names.
    #[serde(default)]
    pub given_names: Option<String>,

    /// Family names.
    #[serde(default)]
    pub family_names: Option<String>,

    /// Institutions listed on the record.
    #[serde(default)]
    pub institution_name: Vec<String>,
}

impl ExpandedRecord {
    /// Institutions joined with `"; "`, or `None` when the record lists none.
    #[must_use]
    pub fn affiliation(&self) -> Option<String> {
        let names: Vec<&str> = self
            .institution_name
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() { None } else { Some(names.join("; ")) }
    }

    /// Convert to a registry candidate; records without an iD are dropped.
    #[must_use]
    pub fn to_candidate(&self) -> Option<Candidate> {
        let id = self.orcid_id.trim();
        if id.is_empty() {
            return None;
        }
        Some(Candidate::new(id, self.affiliation()))
    }
}
