//! Reference export: CSV, BibTeX, RIS and JSON renderings of a paper set.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::models::{ExportFormat, Paper};

/// Render `papers` in `format`.
///
/// # Errors
///
/// Returns error only if JSON serialization fails.
pub fn export_papers(papers: &[Paper], format: ExportFormat) -> serde_json::Result<String> {
    tracing::debug!(papers = papers.len(), format = format.as_str(), "Exporting papers");
    Ok(match format {
        ExportFormat::Csv => format_csv(papers),
        ExportFormat::Bibtex => format_bibtex(papers),
        ExportFormat::Ris => format_ris(papers),
        ExportFormat::Json => serde_json::to_string_pretty(papers)?,
    })
}

/// Format papers as RIS.
#[must_use]
pub fn format_ris(papers: &[Paper]) -> String {
    let mut output = String::new();

    for paper in papers {
        output.push_str("TY  - JOUR\n");
        let _ = writeln!(output, "TI  - {}", single_line(&paper.title));

        for author in &paper.authors {
            let _ = writeln!(output, "AU  - {}", single_line(author));
        }

        let _ = writeln!(output, "PY  - {}", paper.year);
        let _ = writeln!(output, "JO  - {}", single_line(&paper.venue));

        if let Some(url) = &paper.url {
            let _ = writeln!(output, "UR  - {}", single_line(url));
        }

        let _ = writeln!(output, "ID  - {}", single_line(&paper.id.to_string()));
        output.push_str("ER  - \n\n");
    }

    output
}

/// Format papers as BibTeX.
///
/// Keys are the first author's surname followed by the year. Repeated keys
/// get `a`, `b`, ... appended in input order.
#[must_use]
pub fn format_bibtex(papers: &[Paper]) -> String {
    let mut output = String::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for paper in papers {
        let base = bibtex_key(paper);
        let repeats = seen.entry(base.clone()).or_insert(0);
        let key = if *repeats == 0 { base } else { format!("{base}{}", key_suffix(*repeats - 1)) };
        *repeats += 1;

        let _ = writeln!(output, "@article{{{key},");
        let _ = writeln!(output, "  title = {{{}}},", escape_bibtex(&paper.title));
        if !paper.authors.is_empty() {
            let _ = writeln!(output, "  author = {{{}}},", escape_bibtex(&paper.authors.join(" and ")));
        }
        let _ = writeln!(output, "  year = {{{}}},", paper.year);
        let _ = writeln!(output, "  journal = {{{}}},", escape_bibtex(&paper.venue));
        let _ = writeln!(output, "  note = {{Citations: {}}},", paper.citations);
        if let Some(url) = &paper.url {
            let _ = writeln!(output, "  url = {{{url}}},");
        }
        output.push_str("}\n\n");
    }

    output
}

/// Format papers as CSV.
#[must_use]
pub fn format_csv(papers: &[Paper]) -> String {
    let mut output = String::from("id,title,authors,year,venue,citations,url\n");

    for paper in papers {
        let _ = writeln!(
            output,
            "{},{},{},{},{},{},{}",
            csv_escape(&paper.id.to_string()),
            csv_escape(&paper.title),
            csv_escape(&paper.authors.join("; ")),
            paper.year,
            csv_escape(&paper.venue),
            paper.citations,
            csv_escape(paper.url.as_deref().unwrap_or(""))
        );
    }

    output
}

fn bibtex_key(paper: &Paper) -> String {
    let surname: String = paper
        .first_author()
        .and_then(|name| name.split_whitespace().last())
        .unwrap_or("Unknown")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    let surname = if surname.is_empty() { "Unknown".to_string() } else { surname };
    format!("{surname}{}", paper.year)
}

/// `0 -> "a"`, `25 -> "z"`, `26 -> "aa"`.
fn key_suffix(mut n: usize) -> String {
    let mut suffix = Vec::new();
    loop {
        // n % 26 < 26, so the cast cannot truncate.
        suffix.push(char::from(b'a' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    suffix.iter().rev().collect()
}

/// Collapse line breaks so a value fits on one tagged line.
fn single_line(s: &str) -> String {
    s.replace('\r', "").replace('\n', " ")
}

/// Escape a string for BibTeX output.
fn escape_bibtex(s: &str) -> String {
    s.replace('\\', "\\textbackslash{}")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace("\\textbackslash\\{\\}", "\\textbackslash{}")
        .replace('&', "\\&")
        .replace('%', "\\%")
        .replace('$', "\\$")
        .replace('#', "\\#")
        .replace('_', "\\_")
}

/// Escape a string for CSV output (RFC 4180 quoting).
fn csv_escape(s: &str) -> String {
    // Leading formula characters are neutralized for spreadsheet imports.
    let guarded = if s.starts_with(['=', '+', '@']) { format!("'{s}") } else { s.to_string() };

    if guarded.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", guarded.replace('"', "\"\""))
    } else {
        guarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Paper> {
        vec![
            Paper::new(1, "Graph Algorithms", &["Ada Lovelace", "Bob Smith"], 2020, "ICML", 10)
                .with_url("https://example.org/1"),
            Paper::new(2, "Graphs, \"Quoted\"", &["Ada Lovelace"], 2020, "NeurIPS", 5),
            Paper::new(3, "Third", &["Ada Lovelace"], 2020, "NeurIPS", 0),
        ]
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let csv = format_csv(&sample());
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,title,authors,year,venue,citations,url"));
        assert_eq!(
            lines.next(),
            Some("1,Graph Algorithms,Ada Lovelace; Bob Smith,2020,ICML,10,https://example.org/1")
        );
        assert_eq!(lines.next(), Some("2,\"Graphs, \"\"Quoted\"\"\",Ada Lovelace,2020,NeurIPS,5,"));
    }

    #[test]
    fn test_csv_formula_guard() {
        assert_eq!(csv_escape("=SUM(A1)"), "'=SUM(A1)");
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("-1"), "-1");
    }

    #[test]
    fn test_bibtex_keys_are_unique() {
        let bib = format_bibtex(&sample());
        assert!(bib.contains("@article{Lovelace2020,"));
        assert!(bib.contains("@article{Lovelace2020a,"));
        assert!(bib.contains("@article{Lovelace2020b,"));
        assert!(bib.contains("author = {Ada Lovelace and Bob Smith}"));
        assert!(bib.contains("note = {Citations: 10}"));
        assert!(bib.contains("url = {https://example.org/1}"));
    }

    #[test]
    fn test_bibtex_escaping() {
        assert_eq!(escape_bibtex("A & B {x}"), "A \\& B \\{x\\}");
        assert_eq!(escape_bibtex("50% of_c"), "50\\% of\\_c");
        assert_eq!(escape_bibtex("a\\b"), "a\\textbackslash{}b");
    }

    #[test]
    fn test_key_suffix() {
        assert_eq!(key_suffix(0), "a");
        assert_eq!(key_suffix(25), "z");
        assert_eq!(key_suffix(26), "aa");
    }

    #[test]
    fn test_ris_records() {
        let ris = format_ris(&sample()[..1]);
        assert!(ris.starts_with("TY  - JOUR\nTI  - Graph Algorithms\n"));
        assert!(ris.contains("AU  - Ada Lovelace\nAU  - Bob Smith\n"));
        assert!(ris.contains("PY  - 2020\n"));
        assert!(ris.contains("UR  - https://example.org/1\n"));
        assert!(ris.contains("ID  - 1\n"));
        assert!(ris.trim_end().ends_with("ER  -"));
    }

    #[test]
    fn test_ris_free_text_fields_stay_on_one_line() {
        let paper = Paper::new("doi:1\n2", "Title", &["Ada\nLovelace", "Bob\r\nSmith"], 2020, "V", 1)
            .with_url("https://example.org/a\nTY  - JOUR");
        let ris = format_ris(&[paper]);

        assert!(ris.contains("AU  - Ada Lovelace\nAU  - Bob Smith\n"));
        assert!(ris.contains("UR  - https://example.org/a TY  - JOUR\n"));
        assert!(ris.contains("ID  - doi:1 2\n"));
        assert_eq!(ris.matches("TY  - JOUR").count(), 2);
        // Every non-blank line starts with a tag.
        for line in ris.lines().filter(|l| !l.is_empty()) {
            assert_eq!(line.get(2..6), Some("  - "), "untagged line: {line:?}");
        }
    }

    #[test]
    fn test_json_export_is_array() {
        let json = export_papers(&sample(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
        assert_eq!(value[0]["url"], "https://example.org/1");
        assert!(value[1].get("url").is_none());
    }
}
