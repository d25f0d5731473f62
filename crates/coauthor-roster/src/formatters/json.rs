//! JSON roster output.

use serde_json::{Value, json};

use crate::error::RosterResult;
use crate::pipeline::Roster;

use super::OutputRow;

/// Compact representation of one row; empty fields are left out.
#[must_use]
pub fn compact_row(row: &OutputRow) -> Value {
    let mut obj = json!({
        "name": row.name,
        "status": row.status,
        "years": row.years,
        "publications": row.publications,
        "lookupUrl": row.lookup_url,
    });

    if !row.affiliation.is_empty() {
        obj["affiliation"] = json!(row.affiliation);
    }

    if !row.identifier.is_empty() {
        obj["orcid"] = json!(row.identifier);
    }

    if !row.disambiguation_query.is_empty() {
        obj["disambiguationQuery"] = json!(row.disambiguation_query);
    }

    obj
}

/// Render the whole roster as pretty-printed JSON.
pub fn format_json(roster: &Roster) -> RosterResult<String> {
    let value = json!({
        "target": roster.target,
        "period": roster.years,
        "publicationsScanned": roster.scanned,
        "skippedPublications": roster.skipped,
        "totalCollaborators": roster.rows.len(),
        "collaborators": roster.rows.iter().map(compact_row).collect::<Vec<_>>(),
    });

    Ok(serde_json::to_string_pretty(&value)?)
}
