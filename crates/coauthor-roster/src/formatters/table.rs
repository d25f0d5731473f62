//! Plain-text roster for the terminal.

use crate::models::PublicationRecord;
use crate::pipeline::Roster;

use super::OutputRow;

/// Format the roster as a numbered list.
#[must_use]
pub fn format_table(roster: &Roster) -> String {
    let mut output = format!(
        "Collaborators of {} ({})\n\
         Publications scanned: {} | Skipped: {} | Collaborators: {}\n\n",
        roster.target,
        roster.years,
        roster.scanned,
        roster.skipped.len(),
        roster.rows.len()
    );

    if roster.rows.is_empty() {
        output.push_str("No collaborators found.\n");
        return output;
    }

    for (i, row) in roster.rows.iter().enumerate() {
        output.push_str(&format_row(row, i + 1));
        output.push('\n');
    }

    output
}

/// Format a single roster line.
#[must_use]
pub fn format_row(row: &OutputRow, index: usize) -> String {
    let affiliation =
        if row.affiliation.is_empty() { "affiliation unknown" } else { row.affiliation.as_str() };

    let identity = match row.status.as_str() {
        "unique" => format!("ORCID {}", row.lookup_url),
        "ambiguous" => format!(
            "multiple ORCID candidates, search \"{}\": {}",
            row.disambiguation_query, row.lookup_url
        ),
        "none" => format!("no ORCID found: {}", row.lookup_url),
        _ => "ORCID not checked".to_string(),
    };

    format!("{index}. {} | {affiliation} | {identity} | {}", row.name, row.years_label())
}

/// List scanned publications, as shown in verbose mode.
#[must_use]
pub fn format_publications(publications: &[PublicationRecord]) -> String {
    let mut output = String::new();

    for (i, publication) in publications.iter().enumerate() {
        output.push_str(&format!(
            "{}. {}, {}",
            i + 1,
            publication.title_or_default(),
            publication.year
        ));
        if let Some(venue) = &publication.venue {
            output.push_str(&format!(" ({venue})"));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearRange;

    fn row(name: &str, status: &str) -> OutputRow {
        OutputRow {
            name: name.to_string(),
            affiliation: String::new(),
            identifier: String::new(),
            disambiguation_query: if status == "ambiguous" {
                name.to_string()
            } else {
                String::new()
            },
            status: status.to_string(),
            years: vec![2022, 2023],
            publications: 2,
            lookup_url: "https://orcid.org/x".to_string(),
        }
    }

    fn roster(rows: Vec<OutputRow>) -> Roster {
        Roster {
            target: "John A. Smith".to_string(),
            years: YearRange { start: 2022, end: 2024 },
            publications: vec![PublicationRecord::new("P", 2023, ["Jane Doe"])],
            scanned: 1,
            skipped: Vec::new(),
            rows,
        }
    }

    #[test]
    fn test_empty_roster() {
        let output = format_table(&roster(Vec::new()));
        assert!(output.contains("Collaborators of John A. Smith (2022-2024)"));
        assert!(output.contains("No collaborators found."));
    }

    #[test]
    fn test_rows_are_numbered() {
        let rows = vec![row("Bob Lee", "ambiguous"), row("Jane Doe", "unique")];
        let output = format_table(&roster(rows));
        assert!(output.contains("Publications scanned: 1 | Skipped: 0 | Collaborators: 2"));
        assert!(output.contains(
            "1. Bob Lee | affiliation unknown | multiple ORCID candidates, search \"Bob Lee\""
        ));
        assert!(output.contains(
            "2. Jane Doe | affiliation unknown | ORCID https://orcid.org/x | 2022, 2023"
        ));
    }

    #[test]
    fn test_format_publications() {
        let mut publication = PublicationRecord::new("Shared Work", 2023, ["Jane Doe"]);
        publication.venue = Some("Nature".to_string());
        let output = format_publications(&[publication]);
        assert_eq!(output, "1. Shared Work, 2023 (Nature)\n");
    }
}
