//! Data models: Semantic Scholar and ORCID API entities, plus the roster's own records.
//!
//! API models use `#[serde(default)]` for optional fields and rename attributes to
//! match the remote naming.

mod author;
mod collaborator;
mod enums;
mod orcid;
mod paper;
mod publication;

pub use author::{Author, AuthorRef, AuthorSearchResult};
pub use collaborator::{Candidate, CollaboratorRecord, IdentifierResult};
pub use enums::OutputFormat;
pub use orcid::{ExpandedRecord, ExpandedSearchResult};
pub use paper::{AuthorPapersResult, Paper};
pub use publication::{PublicationRecord, YearRange, split_author_field};
