//! Delimited-file output.

use std::path::Path;

use crate::error::{RosterError, RosterResult};

use super::OutputRow;

/// CSV header, one column per [`OutputRow`] field.
pub const HEADER: &str =
    "name,affiliation,orcid,disambiguation_query,status,years,publications,lookup_url";

/// Format rows as CSV, header included.
#[must_use]
pub fn format_csv(rows: &[OutputRow]) -> String {
    let mut output = String::new();
    output.push_str(HEADER);
    output.push('\n');

    for row in rows {
        let years = row.years.iter().map(ToString::to_string).collect::<Vec<_>>().join(";");
        output.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            csv_escape(&row.name),
            csv_escape(&row.affiliation),
            csv_escape(&row.identifier),
            csv_escape(&row.disambiguation_query),
            row.status,
            years,
            row.publications,
            csv_escape(&row.lookup_url)
        ));
    }

    output
}

/// Write rows to a CSV file, replacing any existing file.
pub fn write_csv(path: &Path, rows: &[OutputRow]) -> RosterResult<()> {
    std::fs::write(path, format_csv(rows)).map_err(|source| RosterError::Output {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Wrote roster file");
    Ok(())
}

fn csv_escape(s: &str) -> String {
    let guarded = s.starts_with(['=', '+', '-', '@']);

    if s.contains([',', '"', '\n', '\r']) {
        // Prefix with single quote to prevent formula injection in spreadsheets
        let escaped = s.replace('"', "\"\"");
        if guarded { format!("\"'{}\"", escaped) } else { format!("\"{}\"", escaped) }
    } else if guarded {
        format!("'{}", s)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, affiliation: &str) -> OutputRow {
        OutputRow {
            name: name.to_string(),
            affiliation: affiliation.to_string(),
            identifier: "0000-0001-0000-0001".to_string(),
            disambiguation_query: String::new(),
            status: "unique".to_string(),
            years: vec![2022, 2023],
            publications: 3,
            lookup_url: "https://orcid.org/0000-0001-0000-0001".to_string(),
        }
    }

    #[test]
    fn test_csv_rows() {
        let output = format_csv(&[row("Jane Doe", "MIT")]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "Jane Doe,MIT,0000-0001-0000-0001,,unique,2022;2023,3,https://orcid.org/0000-0001-0000-0001"
        );
    }

    #[test]
    fn test_csv_escapes_commas_and_quotes() {
        let output = format_csv(&[row("Doe, Jane", "Dept. of \"Physics\", MIT")]);
        let line = output.lines().nth(1).unwrap();
        assert!(line.starts_with("\"Doe, Jane\",\"Dept. of \"\"Physics\"\", MIT\","));
    }

    #[test]
    fn test_csv_guards_formula_injection() {
        assert_eq!(csv_escape("=SUM(A1)"), "'=SUM(A1)");
        assert_eq!(csv_escape("-1,2"), "\"'-1,2\"");
        assert_eq!(csv_escape("plain"), "plain");
    }

    #[test]
    fn test_empty_roster_has_header_only() {
        assert_eq!(format_csv(&[]), format!("{HEADER}\n"));
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        write_csv(&path, &[row("Jane Doe", "MIT")]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(HEADER));
        assert!(written.contains("Jane Doe,MIT"));
    }

    #[test]
    fn test_write_csv_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("roster.csv");
        let err = write_csv(&path, &[]).unwrap_err();
        assert!(err.to_string().contains("roster.csv"));
    }
}
