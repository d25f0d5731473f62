//! Publications attributed to the target, as handed to the aggregator.

use std::fmt;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RosterError;

/// One paper attributed (in part) to the target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
    /// Paper title.
    #[serde(default)]
    pub title: String,

    /// Publication venue (journal or conference).
    #[serde(default)]
    pub venue: Option<String>,

    /// Publication year.
    pub year: i32,

    /// Raw author names in source order.
    ///
    /// Accepts either a JSON array or a BibTeX-style `"A and B and C"` string. Any other
    /// shape yields an empty list, which the aggregator reports as a skipped publication.
    #[serde(default, deserialize_with = "deserialize_authors")]
    pub authors: Vec<String>,
}

impl PublicationRecord {
    /// Create a publication from a year and author names.
    #[must_use]
    pub fn new<I, S>(title: impl Into<String>, year: i32, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            venue: None,
            year,
            authors: authors.into_iter().map(Into::into).collect(),
        }
    }

    /// Title, falling back to "Untitled".
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        if self.title.trim().is_empty() { "Untitled" } else { &self.title }
    }
}

/// Split a BibTeX-style author field (`"Doe, Jane and Bob Lee"`) into names.
#[must_use]
pub fn split_author_field(field: &str) -> Vec<String> {
    field
        .split(" and ")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

fn deserialize_authors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AuthorField {
        List(Vec<String>),
        Joined(String),
        Unusable(IgnoredAny),
    }

    Ok(match Option::<AuthorField>::deserialize(deserializer)? {
        Some(AuthorField::List(names)) => names,
        Some(AuthorField::Joined(field)) => split_author_field(&field),
        Some(AuthorField::Unusable(_)) | None => Vec::new(),
    })
}

/// Inclusive range of publication years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    /// First year (inclusive).
    pub start: i32,
    /// Last year (inclusive).
    pub end: i32,
}

impl YearRange {
    /// Create a range, rejecting reversed bounds.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `start > end`.
    pub fn new(start: i32, end: i32) -> Result<Self, RosterError> {
        if start > end {
            return Err(RosterError::validation(
                "period",
                format!("start year {start} is after end year {end}"),
            ));
        }
        Ok(Self { start, end })
    }

    /// The `span` calendar years ending with `end`.
    #[must_use]
    pub fn ending_at(end: i32, span: i32) -> Self {
        Self { start: end - span.max(1) + 1, end }
    }

    /// Whether a year falls inside the range.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for YearRange {
    type Err = RosterError;

    /// Parse `"2022-2024"` or a single year `"2023"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_year = |part: &str| {
            part.trim().parse::<i32>().map_err(|_| {
                RosterError::validation("period", format!("'{}' is not a year", part.trim()))
            })
        };

        match s.split_once('-') {
            Some((start, end)) => Self::new(parse_year(start)?, parse_year(end)?),
            None => {
                let year = parse_year(s)?;
                Self::new(year, year)
            }
        }
    }
}
