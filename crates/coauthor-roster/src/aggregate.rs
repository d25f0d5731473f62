//! Merge publication author lists into one record per distinct co-author.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{CollaboratorRecord, PublicationRecord};
use crate::name;
use crate::target::TargetIdentity;

/// Why a publication contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The author list was empty.
    EmptyAuthorList,
    /// No author name in the list survived normalization.
    UnusableAuthorNames,
}

/// A publication whose author data was unusable.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedPublication {
    /// Position in the input sequence.
    pub index: usize,
    /// Publication title.
    pub title: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Result of aggregating a publication stream.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Collaborators keyed by normalized name key.
    pub collaborators: BTreeMap<String, CollaboratorRecord>,
    /// Publications that contributed at least one usable author.
    pub publications_scanned: usize,
    /// Publications skipped for unusable author data.
    pub skipped: Vec<SkippedPublication>,
}

impl Aggregation {
    /// Number of distinct collaborators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collaborators.len()
    }

    /// True if no collaborator was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collaborators.is_empty()
    }
}

/// Aggregate co-authors across publications, excluding the target.
///
/// Publications are visited in input order and authors in list order, so the first raw
/// form of a name becomes its display name. A publication whose author data is unusable
/// is skipped on its own and does not stop aggregation.
#[must_use]
pub fn aggregate(publications: &[PublicationRecord], target: &TargetIdentity) -> Aggregation {
    let mut result = Aggregation::default();

    for (index, publication) in publications.iter().enumerate() {
        if publication.authors.is_empty() {
            skip(&mut result, index, publication, SkipReason::EmptyAuthorList);
            continue;
        }

        let names: Vec<_> = publication
            .authors
            .iter()
            .filter_map(|raw| name::normalize(raw).map(|n| (raw, n)))
            .collect();

        if names.is_empty() {
            skip(&mut result, index, publication, SkipReason::UnusableAuthorNames);
            continue;
        }

        result.publications_scanned += 1;
        tracing::debug!(
            index,
            title = publication.title_or_default(),
            year = publication.year,
            authors = names.len(),
            "Scanning publication"
        );

        for (raw, normalized) in names {
            if target.is_target(&normalized) {
                continue;
            }

            result
                .collaborators
                .entry(normalized.key().to_string())
                .or_insert_with(|| {
                    CollaboratorRecord::new(normalized, raw.trim(), publication.year)
                })
                .add_publication(publication.year, &publication.title);
        }
    }

    tracing::info!(
        publications = result.publications_scanned,
        skipped = result.skipped.len(),
        collaborators = result.collaborators.len(),
        "Aggregated collaborators"
    );

    result
}

fn skip(
    result: &mut Aggregation,
    index: usize,
    publication: &PublicationRecord,
    reason: SkipReason,
) {
    tracing::warn!(
        index,
        title = publication.title_or_default(),
        ?reason,
        "Skipping publication with unusable author list"
    );
    result.skipped.push(SkippedPublication {
        index,
        title: publication.title_or_default().to_string(),
        reason,
    });
}
