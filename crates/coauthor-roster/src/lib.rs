//! Coauthor Roster
//!
//! Builds the roster of a researcher's collaborators over a window of years:
//! who they published with, when, where those people work, and their ORCID iD.
//!
//! # Pipeline
//!
//! 1. Fetch the target's publications from a [`ProfileSource`] (Semantic Scholar or a JSON file)
//! 2. Aggregate coauthors by normalized name, excluding the target's own name variants
//! 3. Resolve each collaborator against an [`IdentifierRegistry`] (ORCID), concurrently
//! 4. Enrich with affiliations and format as a table, JSON, or CSV
//!
//! # Example
//!
//! ```no_run
//! use coauthor_roster::{
//!     client::{OrcidClient, SemanticScholarClient},
//!     config::Config,
//!     models::YearRange,
//!     pipeline::{self, RunContext},
//!     target::TargetIdentity,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let profiles = SemanticScholarClient::new(&config)?;
//!     let registry = OrcidClient::new(&config)?;
//!
//!     let target = TargetIdentity::new("Jane Doe", ["J. Doe"])?;
//!     let ctx = RunContext::new(target, YearRange::new(2021, 2024)?, config.lookup_timeout);
//!     let roster = pipeline::run(&ctx, &profiles, &registry).await?;
//!
//!     println!("{}", coauthor_roster::formatters::table::format_table(&roster));
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod client;
pub mod config;
pub mod enrich;
pub mod error;
pub mod formatters;
pub mod models;
pub mod name;
pub mod pipeline;
pub mod resolve;
pub mod sources;
pub mod target;

pub use client::{FileProfileSource, OrcidClient, SemanticScholarClient};
pub use config::Config;
pub use error::{ClientError, RosterError, SourceError};
pub use name::{NormalizedName, normalize};
pub use sources::{IdentifierRegistry, ProfileSource};
pub use target::TargetIdentity;
