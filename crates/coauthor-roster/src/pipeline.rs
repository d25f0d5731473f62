//! End-to-end roster run: fetch, aggregate, resolve, enrich, format.

use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};

use crate::aggregate::{SkippedPublication, aggregate};
use crate::enrich::enrich;
use crate::error::RosterResult;
use crate::formatters::{self, OutputRow};
use crate::models::{CollaboratorRecord, PublicationRecord, YearRange};
use crate::resolve::resolve;
use crate::sources::{IdentifierRegistry, ProfileSource};
use crate::target::TargetIdentity;

/// Read-only settings for one run, passed explicitly to every stage.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Target person and accepted name variants.
    pub target: TargetIdentity,

    /// Publication year window.
    pub years: YearRange,

    /// Maximum concurrent collaborator lookups (1 = sequential).
    pub workers: usize,

    /// Upper bound on each individual lookup.
    pub lookup_timeout: Duration,
}

impl RunContext {
    /// Create a sequential run context.
    #[must_use]
    pub fn new(target: TargetIdentity, years: YearRange, lookup_timeout: Duration) -> Self {
        Self { target, years, workers: 1, lookup_timeout }
    }

    /// Set the lookup concurrency limit. Zero is treated as one.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}

/// Finished roster.
#[derive(Debug, Clone)]
pub struct Roster {
    /// Target display name.
    pub target: String,
    /// Year window searched.
    pub years: YearRange,
    /// Publications returned by the profile source.
    pub publications: Vec<PublicationRecord>,
    /// Publications that contributed usable author data.
    pub scanned: usize,
    /// Publications skipped for unusable author data.
    pub skipped: Vec<SkippedPublication>,
    /// Ordered output rows.
    pub rows: Vec<OutputRow>,
}

impl Roster {
    /// True if no collaborator was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the roster for `ctx.target`.
///
/// Only a failure to fetch the target's publications is returned as an error. Per-collaborator
/// lookup failures degrade to empty affiliation and identifier fields.
pub async fn run(
    ctx: &RunContext,
    profiles: &dyn ProfileSource,
    registry: &dyn IdentifierRegistry,
) -> RosterResult<Roster> {
    tracing::info!(
        author = ctx.target.display_name(),
        period = %ctx.years,
        source = profiles.name(),
        "Fetching publications"
    );

    let mut publications = profiles.publications(ctx.target.display_name(), ctx.years).await?;
    publications.retain(|p| ctx.years.contains(p.year));

    tracing::info!(count = publications.len(), "Publications within period");

    let aggregation = aggregate(&publications, &ctx.target);
    let total = aggregation.len();

    let started = Instant::now();
    tracing::info!(
        collaborators = total,
        workers = ctx.workers,
        registry = registry.name(),
        "Resolving collaborator affiliations and identifiers"
    );

    let records =
        resolve_all(ctx, profiles, registry, aggregation.collaborators.into_values()).await?;

    tracing::info!(
        collaborators = records.len(),
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Resolution finished"
    );

    Ok(Roster {
        target: ctx.target.display_name().to_string(),
        years: ctx.years,
        rows: formatters::format(&records),
        publications,
        scanned: aggregation.publications_scanned,
        skipped: aggregation.skipped,
    })
}

/// Resolve and enrich every record with at most `ctx.workers` lookups in flight.
///
/// Each future owns its record, so results land in independent slots.
async fn resolve_all<I>(
    ctx: &RunContext,
    profiles: &dyn ProfileSource,
    registry: &dyn IdentifierRegistry,
    records: I,
) -> RosterResult<Vec<CollaboratorRecord>>
where
    I: IntoIterator<Item = CollaboratorRecord>,
{
    let timeout = ctx.lookup_timeout;

    let results: Vec<RosterResult<CollaboratorRecord>> = stream::iter(records)
        .map(move |record| async move {
            let identifier = resolve(registry, &record, timeout).await;
            let affiliation = profile_affiliation(profiles, &record, timeout).await;
            enrich(record, affiliation, identifier)
        })
        .buffered(ctx.workers.max(1))
        .collect()
        .await;

    results.into_iter().collect()
}

async fn profile_affiliation(
    profiles: &dyn ProfileSource,
    record: &CollaboratorRecord,
    timeout: Duration,
) -> Option<String> {
    match tokio::time::timeout(timeout, profiles.affiliation(&record.display_name)).await {
        Ok(Ok(affiliation)) => affiliation,
        Ok(Err(err)) => {
            tracing::warn!(
                collaborator = %record.display_name,
                source = profiles.name(),
                error = %err,
                "Profile affiliation lookup failed"
            );
            None
        }
        Err(_) => {
            tracing::warn!(
                collaborator = %record.display_name,
                source = profiles.name(),
                timeout_secs = timeout.as_secs_f64(),
                "Profile affiliation lookup timed out"
            );
            None
        }
    }
}
