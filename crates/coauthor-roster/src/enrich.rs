//! Merge affiliation and identifier data into a collaborator record.

use crate::error::RosterResult;
use crate::models::{CollaboratorRecord, IdentifierResult};

/// Attach the identifier result and pick an affiliation.
///
/// Precedence: the collaborator's own profile affiliation, then the affiliation of a unique
/// registry match, then nothing. Blank strings count as missing.
///
/// # Errors
///
/// Returns [`crate::error::RosterError::AlreadyResolved`] if the record was enriched before.
pub fn enrich(
    mut collaborator: CollaboratorRecord,
    profile_affiliation: Option<String>,
    identifier: IdentifierResult,
) -> RosterResult<CollaboratorRecord> {
    let registry_affiliation = identifier.affiliation().map(str::to_string);

    collaborator.affiliation =
        non_blank(profile_affiliation).or_else(|| non_blank(registry_affiliation));
    collaborator.set_identifier(identifier)?;

    Ok(collaborator)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::normalize;

    fn record() -> CollaboratorRecord {
        CollaboratorRecord::new(normalize("Jane Doe").unwrap(), "Jane Doe", 2023)
    }

    fn unique(affiliation: Option<&str>) -> IdentifierResult {
        IdentifierResult::Unique {
            identifier: "0000-0001-0000-0001".to_string(),
            affiliation: affiliation.map(String::from),
        }
    }

    #[test]
    fn test_profile_affiliation_wins() {
        let rec = enrich(record(), Some("Stanford".to_string()), unique(Some("MIT"))).unwrap();
        assert_eq!(rec.affiliation.as_deref(), Some("Stanford"));
        assert_eq!(rec.identifier().and_then(|r| r.identifier()), Some("0000-0001-0000-0001"));
    }

    #[test]
    fn test_falls_back_to_registry_affiliation() {
        let rec = enrich(record(), None, unique(Some("MIT"))).unwrap();
        assert_eq!(rec.affiliation.as_deref(), Some("MIT"));

        let rec = enrich(record(), Some("   ".to_string()), unique(Some("MIT"))).unwrap();
        assert_eq!(rec.affiliation.as_deref(), Some("MIT"));
    }

    #[test]
    fn test_ambiguous_contributes_no_affiliation() {
        let ambiguous =
            IdentifierResult::Ambiguous { query: "Jane Doe".to_string(), candidates: 2 };
        let rec = enrich(record(), None, ambiguous).unwrap();
        assert_eq!(rec.affiliation, None);
        assert_eq!(rec.identifier().unwrap().status(), "ambiguous");
    }

    #[test]
    fn test_nothing_known() {
        let rec = enrich(record(), None, IdentifierResult::None).unwrap();
        assert_eq!(rec.affiliation, None);
        assert_eq!(rec.identifier(), Some(&IdentifierResult::None));
    }

    #[test]
    fn test_enriching_twice_fails() {
        let rec = enrich(record(), None, IdentifierResult::None).unwrap();
        assert!(enrich(rec, None, IdentifierResult::None).is_err());
    }
}
