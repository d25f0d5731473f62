//! Seams to the outside world: where publications come from and where identifiers
//! are looked up.

use crate::error::{ClientResult, SourceResult};
use crate::models::{Candidate, PublicationRecord, YearRange};

/// Scholarly profile source.
#[async_trait::async_trait]
pub trait ProfileSource: Send + Sync {
    /// Source name for logs (e.g., "semantic-scholar").
    fn name(&self) -> &'static str;

    /// Publications of `author` within `years`, newest first.
    ///
    /// An error here means the target's history is unavailable and the run cannot continue.
    async fn publications(
        &self,
        author: &str,
        years: YearRange,
    ) -> SourceResult<Vec<PublicationRecord>>;

    /// Affiliation from the collaborator's own profile, when one can be found.
    async fn affiliation(&self, collaborator: &str) -> SourceResult<Option<String>>;
}

/// Identifier registry searchable by name.
#[async_trait::async_trait]
pub trait IdentifierRegistry: Send + Sync {
    /// Registry name for logs (e.g., "orcid").
    fn name(&self) -> &'static str;

    /// Candidates whose given and family names match. `first_name` may be empty.
    async fn search(&self, first_name: &str, last_name: &str) -> ClientResult<Vec<Candidate>>;
}
