//! Identifier resolution for aggregated collaborators.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::ClientError;
use crate::models::{Candidate, CollaboratorRecord, IdentifierResult};
use crate::name::NormalizedName;
use crate::sources::IdentifierRegistry;

/// Look a collaborator up in the registry and classify the candidates.
///
/// A failed or timed-out lookup resolves to [`IdentifierResult::None`]; it is logged and
/// never retried here.
pub async fn resolve(
    registry: &dyn IdentifierRegistry,
    collaborator: &CollaboratorRecord,
    timeout: Duration,
) -> IdentifierResult {
    let name = &collaborator.name;
    let lookup = registry.search(name.first_name(), name.last_name());

    let outcome = match tokio::time::timeout(timeout, lookup).await {
        Ok(result) => result,
        Err(_) => Err(ClientError::Timeout(timeout)),
    };

    match outcome {
        Ok(candidates) => {
            let result = classify(name, candidates);
            tracing::debug!(
                collaborator = %collaborator.display_name,
                registry = registry.name(),
                status = result.status(),
                "Resolved identifier"
            );
            result
        }
        Err(err) => {
            tracing::warn!(
                collaborator = %collaborator.display_name,
                registry = registry.name(),
                transient = err.is_retryable(),
                error = %err,
                "Identifier lookup failed"
            );
            IdentifierResult::None
        }
    }
}

/// Reduce registry candidates to a result.
///
/// Candidates are deduplicated by identifier first. Several distinct identifiers are
/// never narrowed down automatically, even when their names are identical.
#[must_use]
pub fn classify(name: &NormalizedName, candidates: Vec<Candidate>) -> IdentifierResult {
    let mut seen = HashSet::new();
    let mut distinct: Vec<Candidate> =
        candidates.into_iter().filter(|c| seen.insert(c.identifier.clone())).collect();

    match distinct.len() {
        0 => IdentifierResult::None,
        1 => {
            let Candidate { identifier, affiliation } = distinct.remove(0);
            IdentifierResult::Unique { identifier, affiliation }
        }
        n => IdentifierResult::Ambiguous { query: name.lookup_query(), candidates: n },
    }
}
