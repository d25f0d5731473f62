//! Property-based tests for name normalization and aggregation.

use std::collections::BTreeSet;

use proptest::prelude::*;

use coauthor_roster::aggregate::aggregate;
use coauthor_roster::models::PublicationRecord;
use coauthor_roster::{TargetIdentity, normalize};

/// Plain capitalized name token.
fn token() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,8}"
}

/// A two or three token name.
fn person() -> impl Strategy<Value = String> {
    prop::collection::vec(token(), 2..=3).prop_map(|parts| parts.join(" "))
}

/// Spacing, casing and trailing punctuation changes that keep the key.
fn disguise(name: &str, upper: bool, pad: usize, trailing: &str) -> String {
    let spaced = name.split(' ').collect::<Vec<_>>().join(&" ".repeat(pad + 1));
    let cased = if upper { spaced.to_uppercase() } else { spaced.to_lowercase() };
    format!("{}{cased}{trailing}", " ".repeat(pad))
}

fn publications() -> impl Strategy<Value = Vec<PublicationRecord>> {
    prop::collection::vec(
        (2015i32..2025, prop::collection::vec(person(), 1..5)),
        0..12,
    )
    .prop_map(|pubs| {
        pubs.into_iter()
            .enumerate()
            .map(|(i, (year, mut authors))| {
                authors.push("Target Person".to_string());
                PublicationRecord::new(format!("Paper {i}"), year, authors)
            })
            .collect()
    })
}

proptest! {
    /// Whitespace, casing and trailing periods or commas do not change the key.
    #[test]
    fn normalization_ignores_cosmetic_differences(
        name in person(),
        upper in any::<bool>(),
        pad in 0usize..3,
        trailing in prop::sample::select(vec!["", ".", ",", " ."]),
    ) {
        let plain = normalize(&name).unwrap();
        let disguised = normalize(&disguise(&name, upper, pad, trailing)).unwrap();
        prop_assert_eq!(plain.key(), disguised.key());
    }

    /// Normalizing a key again is a no-op.
    #[test]
    fn normalization_is_idempotent(name in "[A-Za-z .,;']{0,40}") {
        if let Some(first) = normalize(&name) {
            let again = normalize(first.key()).unwrap();
            prop_assert_eq!(first.key(), again.key());
        }
    }

    /// The target never appears among its own collaborators.
    #[test]
    fn target_is_never_a_collaborator(pubs in publications()) {
        let target = TargetIdentity::new("Target Person", ["T. Person"]).unwrap();
        let aggregation = aggregate(&pubs, &target);
        prop_assert!(!aggregation.collaborators.contains_key("target person"));
    }

    /// One record per distinct non-target normalized name.
    #[test]
    fn one_record_per_distinct_collaborator(pubs in publications()) {
        let target = TargetIdentity::new("Target Person", Vec::<String>::new()).unwrap();
        let aggregation = aggregate(&pubs, &target);

        let expected: BTreeSet<String> = pubs
            .iter()
            .flat_map(|p| p.authors.iter())
            .filter_map(|a| normalize(a))
            .filter(|n| !target.is_target(n))
            .map(|n| n.key().to_string())
            .collect();

        prop_assert_eq!(aggregation.len(), expected.len());
    }

    /// Year sets do not depend on publication order.
    #[test]
    fn year_sets_are_order_independent(pubs in publications()) {
        let target = TargetIdentity::new("Target Person", Vec::<String>::new()).unwrap();
        let forward = aggregate(&pubs, &target);

        let mut reversed_pubs = pubs.clone();
        reversed_pubs.reverse();
        let reversed = aggregate(&reversed_pubs, &target);

        prop_assert_eq!(forward.len(), reversed.len());
        for (key, record) in &forward.collaborators {
            let other = &reversed.collaborators[key];
            prop_assert_eq!(&record.years, &other.years);
            prop_assert_eq!(record.publication_count(), other.publication_count());
        }
    }
}
