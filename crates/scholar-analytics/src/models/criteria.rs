//! Filter criteria accepted from the presentation layer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Paper filter criteria.
///
/// Every field is optional and an absent field imposes no constraint. The
/// same camelCase shape is used for requests and echoed in responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Earliest publication year (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_min: Option<i32>,

    /// Latest publication year (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_max: Option<i32>,

    /// Minimum citation count (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_min: Option<u64>,

    /// Maximum citation count (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_max: Option<u64>,

    /// Case-insensitive substring matched against every byline author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_substring: Option<String>,

    /// Venues to keep (exact match).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_set: Option<BTreeSet<String>>,
}

impl FilterCriteria {
    /// Criteria that match every paper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to an inclusive year range.
    #[must_use]
    pub fn years(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.year_min = min;
        self.year_max = max;
        self
    }

    /// Restrict to an inclusive citation range.
    #[must_use]
    pub fn citations(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.citation_min = min;
        self.citation_max = max;
        self
    }

    /// Restrict to papers with an author containing `needle`.
    #[must_use]
    pub fn author(mut self, needle: impl Into<String>) -> Self {
        self.author_substring = Some(needle.into());
        self
    }

    /// Restrict to the given venues.
    #[must_use]
    pub fn venues<I, S>(mut self, venues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.venue_set = Some(venues.into_iter().map(Into::into).collect());
        self
    }

    /// The author needle, if it constrains anything.
    #[must_use]
    pub fn author_needle(&self) -> Option<&str> {
        self.author_substring.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// The venue set, if it constrains anything.
    #[must_use]
    pub fn active_venues(&self) -> Option<&BTreeSet<String>> {
        self.venue_set.as_ref().filter(|v| !v.is_empty())
    }

    /// True if no field constrains the result.
    ///
    /// A blank author substring and an empty venue set count as absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.year_min.is_none()
            && self.year_max.is_none()
            && self.citation_min.is_none()
            && self.citation_max.is_none()
            && self.author_needle().is_none()
            && self.active_venues().is_none()
    }

    /// Reject inverted ranges.
    pub fn validate(&self) -> AnalysisResult<()> {
        if let (Some(min), Some(max)) = (self.year_min, self.year_max) {
            if min > max {
                return Err(AnalysisError::filter(format!(
                    "yearMin ({min}) is greater than yearMax ({max})"
                )));
            }
        }

        if let (Some(min), Some(max)) = (self.citation_min, self.citation_max) {
            if min > max {
                return Err(AnalysisError::filter(format!(
                    "citationMin ({min}) is greater than citationMax ({max})"
                )));
            }
        }

        Ok(())
    }

    /// Stable textual form used in cache keys.
    #[must_use]
    pub fn canonical_key(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        // Struct field order and BTreeSet ordering make the JSON deterministic.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(FilterCriteria::new().is_empty());
        assert!(FilterCriteria::new().author("  ").is_empty());
        assert!(FilterCriteria::new().venues(Vec::<String>::new()).is_empty());
        assert!(!FilterCriteria::new().years(Some(2020), None).is_empty());
    }

    #[test]
    fn test_validate_rejects_inverted_year_range() {
        let criteria = FilterCriteria::new().years(Some(2021), Some(2019));
        let err = criteria.validate().unwrap_err();
        assert!(err.to_string().contains("yearMin"));
    }

    #[test]
    fn test_validate_rejects_inverted_citation_range() {
        let criteria = FilterCriteria::new().citations(Some(50), Some(5));
        assert!(criteria.validate().is_err());
        assert!(FilterCriteria::new().citations(Some(5), Some(5)).validate().is_ok());
    }

    #[test]
    fn test_camel_case_shape() {
        let criteria: FilterCriteria = serde_json::from_value(json!({
            "yearMin": 2019,
            "citationMax": 100,
            "authorSubstring": "smith",
            "venueSet": ["NeurIPS", "ICML"]
        }))
        .unwrap();

        assert_eq!(criteria.year_min, Some(2019));
        assert_eq!(criteria.citation_max, Some(100));
        assert_eq!(criteria.active_venues().map(BTreeSet::len), Some(2));

        let back = serde_json::to_value(&criteria).unwrap();
        assert_eq!(back["authorSubstring"], "smith");
        assert!(back.get("yearMax").is_none());
    }

    #[test]
    fn test_canonical_key_ignores_venue_order() {
        let a = FilterCriteria::new().venues(["B", "A"]);
        let b = FilterCriteria::new().venues(["A", "B"]);
        assert_eq!(a.canonical_key(), b.canonical_key());
        assert_eq!(FilterCriteria::new().canonical_key(), "");
    }
}
