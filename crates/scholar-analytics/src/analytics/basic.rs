//! Basic citation metrics: totals, central tendency, spread, h-index.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::Paper;

/// Inclusive publication year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    /// Earliest year.
    pub min: i32,
    /// Latest year.
    pub max: i32,
}

impl YearRange {
    /// Number of calendar years covered.
    #[must_use]
    pub fn span(self) -> u32 {
        self.max.abs_diff(self.min).saturating_add(1)
    }
}

/// One bucket of the citation distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationBucket {
    /// Bucket label, e.g. `"11-50"`.
    pub range: String,
    /// Papers in the bucket.
    pub count: usize,
}

/// Aggregate statistics over a paper set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicMetrics {
    /// Papers in the set.
    pub total_papers: usize,
    /// Sum of citation counts, saturating at `u64::MAX`.
    pub total_citations: u64,
    /// Mean citations per paper.
    pub mean_citations: f64,
    /// Median citations per paper.
    pub median_citations: f64,
    /// Population standard deviation of citations.
    pub std_dev_citations: f64,
    /// Largest `h` with `h` papers cited at least `h` times.
    pub h_index: usize,
    /// Most citations on a single paper.
    pub max_citations: u64,
    /// Fewest citations on a single paper.
    pub min_citations: u64,
    /// Papers cited at least once.
    pub papers_with_citations: usize,
    /// Mean author count per paper.
    pub average_authors: f64,
    /// Distinct venues.
    pub unique_venues: usize,
    /// `None` for an empty set; use [`BasicMetrics::year_range`] to get an error instead.
    pub year_range: Option<YearRange>,
    /// Papers divided by the calendar years in the range.
    pub average_papers_per_year: f64,
    /// Paper counts per citation bucket, all six always present.
    pub citation_distribution: Vec<CitationBucket>,
}

impl BasicMetrics {
    /// The publication year range.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDataset` when computed over zero papers.
    pub fn year_range(&self) -> AnalysisResult<YearRange> {
        self.year_range.ok_or_else(|| AnalysisError::empty_dataset("year range"))
    }
}

impl Default for BasicMetrics {
    fn default() -> Self {
        basic_metrics(&[])
    }
}

/// Citation buckets: `(label, upper bound inclusive)`.
const CITATION_BUCKETS: [(&str, u64); 6] = [
    ("0", 0),
    ("1-10", 10),
    ("11-50", 50),
    ("51-100", 100),
    ("101-500", 500),
    ("500+", u64::MAX),
];

/// Compute basic metrics. An empty set yields zeros and no year range.
#[must_use]
pub fn basic_metrics(papers: &[Paper]) -> BasicMetrics {
    let citations: Vec<u64> = papers.iter().map(|p| p.citations).collect();
    let total_citations = citation_total(&citations);
    let year_range = year_range(papers).ok();

    let average_papers_per_year = year_range
        .map(|range| papers.len() as f64 / f64::from(range.span()))
        .unwrap_or(0.0);

    let author_counts: Vec<u64> = papers.iter().map(|p| p.authors.len() as u64).collect();
    let unique_venues = papers.iter().map(|p| p.venue.as_str()).collect::<HashSet<_>>().len();

    BasicMetrics {
        total_papers: papers.len(),
        total_citations,
        mean_citations: mean(&citations),
        median_citations: median(&citations),
        std_dev_citations: std_dev(&citations),
        h_index: h_index(&citations),
        max_citations: citations.iter().copied().max().unwrap_or(0),
        min_citations: citations.iter().copied().min().unwrap_or(0),
        papers_with_citations: papers.iter().filter(|p| p.has_citations()).count(),
        average_authors: mean(&author_counts),
        unique_venues,
        year_range,
        average_papers_per_year,
        citation_distribution: citation_distribution(papers),
    }
}

/// Year range of a paper set.
///
/// # Errors
///
/// Returns `EmptyDataset` for an empty set.
pub fn year_range(papers: &[Paper]) -> AnalysisResult<YearRange> {
    let min = papers.iter().map(|p| p.year).min();
    let max = papers.iter().map(|p| p.year).max();
    match (min, max) {
        (Some(min), Some(max)) => Ok(YearRange { min, max }),
        _ => Err(AnalysisError::empty_dataset("year range")),
    }
}

/// h-index: the largest `h` such that `h` values are each at least `h`.
#[must_use]
pub fn h_index(citations: &[u64]) -> usize {
    let mut sorted = citations.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.iter().enumerate().take_while(|&(i, &c)| c >= (i as u64) + 1).count()
}

/// Sum of citation counts, saturating at `u64::MAX`.
#[must_use]
pub fn citation_total(values: &[u64]) -> u64 {
    values.iter().fold(0, |acc, &c| acc.saturating_add(c))
}

/// Arithmetic mean; 0 for an empty slice.
#[must_use]
pub fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    // f64 sum: the u64 total may saturate.
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Median; mean of the two central values for even lengths, 0 when empty.
#[must_use]
pub fn median(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Population standard deviation (divides by N); 0 when empty.
#[must_use]
pub fn std_dev(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    let variance =
        values.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Paper counts per citation bucket. All six buckets are always present.
#[must_use]
pub fn citation_distribution(papers: &[Paper]) -> Vec<CitationBucket> {
    let mut counts = [0usize; CITATION_BUCKETS.len()];
    for paper in papers {
        let slot = CITATION_BUCKETS
            .iter()
            .position(|&(_, upper)| paper.citations <= upper)
            .unwrap_or(CITATION_BUCKETS.len() - 1);
        counts[slot] += 1;
    }

    CITATION_BUCKETS
        .iter()
        .zip(counts)
        .map(|(&(label, _), count)| CitationBucket { range: label.to_string(), count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: i32, year: i32, citations: u64) -> Paper {
        Paper::new(id, format!("Paper {id}"), &["A"], year, "V", citations)
    }

    #[test]
    fn test_h_index_examples() {
        assert_eq!(h_index(&[]), 0);
        assert_eq!(h_index(&[10, 5]), 2);
        assert_eq!(h_index(&[0, 0, 0]), 0);
        assert_eq!(h_index(&[3, 0, 6, 1, 5]), 3);
        assert_eq!(h_index(&[100]), 1);
        assert_eq!(h_index(&[4, 4, 4, 4]), 4);
    }

    #[test]
    fn test_citation_total_saturates() {
        assert_eq!(citation_total(&[3, 4]), 7);
        assert_eq!(citation_total(&[u64::MAX, 1]), u64::MAX);
        assert_eq!(mean(&[u64::MAX, u64::MAX]), u64::MAX as f64);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert!((median(&[10, 5]) - 7.5).abs() < f64::EPSILON);
        assert!((median(&[3, 1, 2]) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_std_dev_population() {
        // mean 5, squared deviations 9+1+1+9 = 20, /4 = 5
        let sd = std_dev(&[2, 4, 6, 8]);
        assert!((sd - 5.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_two_paper_scenario() {
        let papers = vec![paper(1, 2020, 10), paper(2, 2021, 5)];
        let metrics = basic_metrics(&papers);
        assert_eq!(metrics.total_papers, 2);
        assert_eq!(metrics.total_citations, 15);
        assert!((metrics.mean_citations - 7.5).abs() < f64::EPSILON);
        assert!((metrics.median_citations - 7.5).abs() < f64::EPSILON);
        assert_eq!(metrics.h_index, 2);
        assert_eq!(metrics.year_range().unwrap(), YearRange { min: 2020, max: 2021 });
        assert!((metrics.average_papers_per_year - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_set_is_zero_but_year_range_errors() {
        let metrics = basic_metrics(&[]);
        assert_eq!(metrics.total_papers, 0);
        assert_eq!(metrics.total_citations, 0);
        assert!(metrics.mean_citations.abs() < f64::EPSILON);
        assert!(metrics.median_citations.abs() < f64::EPSILON);
        assert_eq!(metrics.h_index, 0);
        assert!(matches!(metrics.year_range(), Err(AnalysisError::EmptyDataset { .. })));
    }

    #[test]
    fn test_single_year_denominator_is_one() {
        let papers = vec![paper(1, 2020, 1), paper(2, 2020, 2), paper(3, 2020, 3)];
        let metrics = basic_metrics(&papers);
        assert!((metrics.average_papers_per_year - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_citation_distribution_buckets() {
        let papers = vec![
            paper(1, 2020, 0),
            paper(2, 2020, 10),
            paper(3, 2020, 11),
            paper(4, 2020, 100),
            paper(5, 2020, 501),
        ];
        let dist = citation_distribution(&papers);
        let counts: Vec<usize> = dist.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 1, 0, 1]);
        assert_eq!(dist[5].range, "500+");
    }
}
