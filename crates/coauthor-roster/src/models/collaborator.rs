//! Collaborator records and identifier resolution outcomes.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{RosterError, RosterResult};
use crate::name::NormalizedName;

/// One registry hit for a name query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Registry identifier (an ORCID iD such as `0000-0002-1825-0097`).
    pub identifier: String,

    /// Affiliation text carried by the registry record, if any.
    pub affiliation: Option<String>,
}

impl Candidate {
    /// Create a candidate.
    #[must_use]
    pub fn new(identifier: impl Into<String>, affiliation: Option<String>) -> Self {
        Self { identifier: identifier.into(), affiliation }
    }
}

/// Outcome of looking a collaborator up in the identifier registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum IdentifierResult {
    /// No candidate, or the lookup failed.
    None,

    /// Exactly one candidate.
    Unique {
        /// The candidate's identifier.
        identifier: String,
        /// The candidate's affiliation, if the registry had one.
        affiliation: Option<String>,
    },

    /// Several candidates; a person has to pick one using `query`.
    Ambiguous {
        /// "First Last" query for manual disambiguation.
        query: String,
        /// Number of distinct identifiers returned.
        candidates: usize,
    },
}

impl IdentifierResult {
    /// Identifier for a unique match.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Unique { identifier, .. } => Some(identifier),
            _ => None,
        }
    }

    /// Registry affiliation for a unique match.
    #[must_use]
    pub fn affiliation(&self) -> Option<&str> {
        match self {
            Self::Unique { affiliation, .. } => affiliation.as_deref(),
            _ => None,
        }
    }

    /// Disambiguation query for an ambiguous match.
    #[must_use]
    pub fn disambiguation_query(&self) -> Option<&str> {
        match self {
            Self::Ambiguous { query, .. } => Some(query),
            _ => None,
        }
    }

    /// Short status label.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Unique { .. } => "unique",
            Self::Ambiguous { .. } => "ambiguous",
        }
    }
}

/// A distinct co-author of the target.
#[derive(Debug, Clone, Serialize)]
pub struct CollaboratorRecord {
    /// Normalized name (the record's identity).
    pub name: NormalizedName,

    /// First raw form observed.
    pub display_name: String,

    /// Years in which the collaborator co-authored with the target.
    pub years: BTreeSet<i32>,

    /// Titles of the shared publications, in discovery order.
    pub publications: Vec<String>,

    /// Best-known affiliation, filled by enrichment.
    pub affiliation: Option<String>,

    identifier: Option<IdentifierResult>,
}

impl CollaboratorRecord {
    /// Start a record from its first co-authorship.
    #[must_use]
    pub fn new(name: NormalizedName, display_name: impl Into<String>, year: i32) -> Self {
        Self {
            name,
            display_name: display_name.into(),
            years: BTreeSet::from([year]),
            publications: Vec::new(),
            affiliation: None,
            identifier: None,
        }
    }

    /// Record another shared publication.
    pub fn add_publication(&mut self, year: i32, title: &str) {
        self.years.insert(year);
        if !title.is_empty() && !self.publications.iter().any(|t| t == title) {
            self.publications.push(title.to_string());
        }
    }

    /// Registry outcome, once resolved.
    #[must_use]
    pub const fn identifier(&self) -> Option<&IdentifierResult> {
        self.identifier.as_ref()
    }

    /// Assign the registry outcome. A record is resolved at most once.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::AlreadyResolved`] if an outcome is already set.
    pub fn set_identifier(&mut self, result: IdentifierResult) -> RosterResult<()> {
        if self.identifier.is_some() {
            return Err(RosterError::AlreadyResolved(self.display_name.clone()));
        }
        self.identifier = Some(result);
        Ok(())
    }

    /// Number of distinct shared publications seen.
    #[must_use]
    pub fn publication_count(&self) -> usize {
        self.publications.len()
    }
}
