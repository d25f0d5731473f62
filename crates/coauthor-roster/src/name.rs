//! Author name normalization.
//!
//! A raw author string such as `"John A. Smith"`, `" john  a smith, "` or `"JOHN A SMITH"`
//! is reduced to one comparison key (`"john a smith"`). Two raw strings with the same key
//! are treated as the same person.
//!
//! Policy:
//! - periods are deleted (`"J.A."` becomes `"JA"`)
//! - commas and semicolons separate tokens like whitespace
//! - non-alphanumeric characters are stripped from both ends of every token, so internal
//!   hyphens and apostrophes survive (`"O'Neil-Brown"`)
//! - the key is the case-folded tokens joined by single spaces
//!
//! The lookup split keeps the cleaned original casing: the last token is the family name,
//! the first token (when there are at least two) is the given name, and anything in between
//! is kept as middle names. A single-token name has an empty given name.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A canonical, comparable author name.
///
/// Equality, ordering and hashing use only the normalized key.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedName {
    key: String,
    first_name: String,
    middle_names: Vec<String>,
    last_name: String,
}

impl NormalizedName {
    /// The case-folded comparison key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Given name used for registry lookups (empty for single-token names).
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Tokens between the given and family names.
    #[must_use]
    pub fn middle_names(&self) -> &[String] {
        &self.middle_names
    }

    /// Family name used for registry lookups.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Human-usable "First Last" query, or just the family name when there is no given name.
    #[must_use]
    pub fn lookup_query(&self) -> String {
        if self.first_name.is_empty() {
            self.last_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

impl PartialEq for NormalizedName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for NormalizedName {}

impl Hash for NormalizedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for NormalizedName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NormalizedName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Normalize a raw author name.
///
/// Returns `None` when nothing name-like survives cleaning (blank or pure punctuation input).
#[must_use]
pub fn normalize(raw: &str) -> Option<NormalizedName> {
    let without_periods = raw.replace('.', "");
    let tokens: Vec<&str> = without_periods
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty())
        .collect();

    let (last, rest) = tokens.split_last()?;

    let key = tokens.iter().map(|t| t.to_lowercase()).collect::<Vec<_>>().join(" ");

    let (first_name, middle_names) = match rest.split_first() {
        Some((first, middle)) => {
            ((*first).to_string(), middle.iter().map(|m| (*m).to_string()).collect())
        }
        None => (String::new(), Vec::new()),
    };

    Some(NormalizedName { key, first_name, middle_names, last_name: (*last).to_string() })
}
