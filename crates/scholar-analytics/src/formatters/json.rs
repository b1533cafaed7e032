//! JSON output formatting.

use serde::Serialize;
use serde_json::{Value, json};

use crate::models::Paper;

/// Create a compact paper representation for JSON output.
#[must_use]
pub fn compact_paper(paper: &Paper) -> Value {
    let mut obj = json!({
        "id": paper.id,
        "title": paper.title,
        "year": paper.year,
        "venue": paper.venue,
        "citations": paper.citations,
    });

    if !paper.authors.is_empty() {
        obj["authors"] = json!(paper.authors);
    }

    if let Some(url) = &paper.url {
        obj["url"] = json!(url);
    }

    obj
}

/// Wrap a result section with response metadata.
///
/// `totalPapers` is the size of the analyzed (possibly filtered) set.
pub fn envelope<T: Serialize>(
    section: &str,
    total_papers: usize,
    body: &T,
) -> serde_json::Result<Value> {
    Ok(json!({
        "metadata": {
            "section": section,
            "totalPapers": total_papers,
            "generatedAt": chrono::Utc::now().to_rfc3339(),
        },
        section: serde_json::to_value(body)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_paper() {
        let paper = Paper::new("p1", "Test Paper", &["John Doe"], 2024, "ICML", 42);
        let compact = compact_paper(&paper);

        assert_eq!(compact["id"], "p1");
        assert_eq!(compact["title"], "Test Paper");
        assert_eq!(compact["year"], 2024);
        assert_eq!(compact["citations"], 42);
        assert_eq!(compact["authors"], json!(["John Doe"]));
        assert!(compact.get("url").is_none());
    }

    #[test]
    fn test_compact_paper_numeric_id_and_url() {
        let paper = Paper::new(7, "T", &[], 2020, "V", 0).with_url("https://example.org/7");
        let compact = compact_paper(&paper);
        assert_eq!(compact["id"], 7);
        assert_eq!(compact["url"], "https://example.org/7");
        assert!(compact.get("authors").is_none());
    }

    #[test]
    fn test_envelope() {
        let value = envelope("papers", 3, &vec![1, 2, 3]).unwrap();
        assert_eq!(value["metadata"]["totalPapers"], 3);
        assert_eq!(value["metadata"]["section"], "papers");
        assert_eq!(value["papers"], json!([1, 2, 3]));
    }
}
