//! Paper record model and input validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AnalysisError, AnalysisResult};

/// Paper identifier. Inputs may use either JSON strings or integers, and the
/// original form is echoed back on output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaperId {
    /// Integer identifier (e.g. a row number).
    Number(i64),
    /// String identifier (e.g. a DOI or corpus hash).
    Text(String),
}

impl fmt::Display for PaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PaperId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PaperId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<usize> for PaperId {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Number)
    }
}

impl From<&str> for PaperId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Largest accepted citation count: the JSON safe-integer limit, so every
/// count round-trips through JSON clients exactly. Aggregates over counts
/// saturate at `u64::MAX`.
const MAX_CITATIONS: u64 = (1 << 53) - 1;

/// An academic paper record.
///
/// Papers are immutable once loaded. Construction goes through
/// [`Paper::from_value`] (validated input) or [`Paper::new`] (trusted code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Record identifier.
    pub id: PaperId,

    /// Paper title.
    pub title: String,

    /// Authors in byline order. Never empty.
    pub authors: Vec<String>,

    /// Publication year.
    pub year: i32,

    /// Publication venue (journal or conference).
    pub venue: String,

    /// Number of citations received.
    pub citations: u64,

    /// Landing page or PDF link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Paper {
    /// Create a paper from trusted values.
    #[must_use]
    pub fn new(
        id: impl Into<PaperId>,
        title: impl Into<String>,
        authors: &[&str],
        year: i32,
        venue: impl Into<String>,
        citations: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors: authors.iter().map(|a| (*a).to_string()).collect(),
            year,
            venue: venue.into(),
            citations,
            url: None,
        }
    }

    /// Attach a URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Validate one JSON record. `index` is its position in the input array
    /// and is reported in errors together with the offending field.
    pub fn from_value(index: usize, value: &Value) -> AnalysisResult<Self> {
        let Some(record) = value.as_object() else {
            return Err(AnalysisError::malformed(index, "record", "must be a JSON object"));
        };

        let id = match record.get("id") {
            Some(Value::String(s)) if !s.trim().is_empty() => PaperId::Text(s.clone()),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(n) => PaperId::Number(n),
                None => {
                    return Err(AnalysisError::malformed(index, "id", "must be an integer or a string"));
                }
            },
            Some(_) => {
                return Err(AnalysisError::malformed(index, "id", "must be an integer or a non-empty string"));
            }
            None => return Err(AnalysisError::malformed(index, "id", "is missing")),
        };

        let title = required_str(index, record, "title")?;

        let authors = match record.get("authors") {
            Some(Value::Array(items)) if !items.is_empty() => {
                let mut authors = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(name) if !name.trim().is_empty() => authors.push(name.to_string()),
                        _ => {
                            return Err(AnalysisError::malformed(
                                index,
                                "authors",
                                "must contain only non-empty strings",
                            ));
                        }
                    }
                }
                authors
            }
            Some(Value::Array(_)) => {
                return Err(AnalysisError::malformed(index, "authors", "must not be empty"));
            }
            Some(_) => return Err(AnalysisError::malformed(index, "authors", "must be an array")),
            None => return Err(AnalysisError::malformed(index, "authors", "is missing")),
        };

        let year = match record.get("year") {
            Some(v) => v
                .as_i64()
                .and_then(|y| i32::try_from(y).ok())
                .ok_or_else(|| AnalysisError::malformed(index, "year", "must be an integer"))?,
            None => return Err(AnalysisError::malformed(index, "year", "is missing")),
        };

        let venue = required_str(index, record, "venue")?;

        let citations = match record.get("citations") {
            Some(v) => v.as_u64().filter(|&c| c <= MAX_CITATIONS).ok_or_else(|| {
                AnalysisError::malformed(index, "citations", "must be a non-negative integer below 2^53")
            })?,
            None => return Err(AnalysisError::malformed(index, "citations", "is missing")),
        };

        let url = match record.get("url") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(AnalysisError::malformed(index, "url", "must be a string")),
        };

        Ok(Self { id, title, authors, year, venue, citations, url })
    }

    /// Get the first author's name.
    #[must_use]
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }

    /// Get author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.join(", ")
    }

    /// Authors with repeated names removed, keeping byline order.
    #[must_use]
    pub fn distinct_authors(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.authors.len());
        for author in &self.authors {
            if !seen.contains(&author.as_str()) {
                seen.push(author.as_str());
            }
        }
        seen
    }

    /// Check if this paper has been cited at all.
    #[must_use]
    pub const fn has_citations(&self) -> bool {
        self.citations > 0
    }

    /// Check if any author name contains `needle` (already lowercased).
    #[must_use]
    pub fn has_author_matching(&self, needle: &str) -> bool {
        self.authors.iter().any(|a| a.to_lowercase().contains(needle))
    }
}

/// Validate a paper collection.
///
/// Accepts either a bare array of records or an object carrying them under
/// `papers` (the shape of exported analysis files).
pub fn parse_papers(value: &Value) -> AnalysisResult<Vec<Paper>> {
    let records = match value {
        Value::Array(records) => records,
        Value::Object(obj) => match obj.get("papers") {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(AnalysisError::malformed(0, "papers", "must be an array of paper records"));
            }
        },
        _ => {
            return Err(AnalysisError::malformed(0, "papers", "must be an array of paper records"));
        }
    };

    records.iter().enumerate().map(|(i, v)| Paper::from_value(i, v)).collect()
}

fn required_str(
    index: usize,
    record: &serde_json::Map<String, Value>,
    field: &'static str,
) -> AnalysisResult<String> {
    match record.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(AnalysisError::malformed(index, field, "must be a string")),
        None => Err(AnalysisError::malformed(index, field, "is missing")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_record() -> Value {
        json!({
            "id": 1,
            "title": "Graph Algorithms",
            "authors": ["A", "B"],
            "year": 2020,
            "venue": "X",
            "citations": 10
        })
    }

    #[test]
    fn test_from_value_valid() {
        let paper = Paper::from_value(0, &valid_record()).unwrap();
        assert_eq!(paper.id, PaperId::Number(1));
        assert_eq!(paper.authors, vec!["A", "B"]);
        assert_eq!(paper.citations, 10);
        assert!(paper.url.is_none());
    }

    #[test]
    fn test_from_value_names_offending_field() {
        let mut record = valid_record();
        record["citations"] = json!(-4);
        let err = Paper::from_value(7, &record).unwrap_err();
        match err {
            AnalysisError::MalformedRecord { index, field, .. } => {
                assert_eq!(index, 7);
                assert_eq!(field, "citations");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_authors_rejected() {
        let mut record = valid_record();
        record["authors"] = json!([]);
        let err = Paper::from_value(0, &record).unwrap_err();
        assert!(err.to_string().contains("authors"));
    }

    #[test]
    fn test_string_id_round_trips() {
        let mut record = valid_record();
        record["id"] = json!("10.1000/xyz");
        let paper = Paper::from_value(0, &record).unwrap();
        let out = serde_json::to_value(&paper).unwrap();
        assert_eq!(out["id"], "10.1000/xyz");
    }

    #[test]
    fn test_parse_papers_accepts_wrapped_object() {
        let wrapped = json!({"papers": [valid_record()], "metadata": {"query": "graphs"}});
        assert_eq!(parse_papers(&wrapped).unwrap().len(), 1);
        assert!(parse_papers(&json!("nope")).is_err());
    }

    #[test]
    fn test_distinct_authors_keeps_order() {
        let paper = Paper::new(1, "T", &["B", "A", "B"], 2020, "V", 0);
        assert_eq!(paper.distinct_authors(), vec!["B", "A"]);
    }
}
