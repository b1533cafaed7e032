//! Filter engine and filter-option helpers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisResult;
use crate::models::{FilterCriteria, Paper};

/// Values available for building filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Distinct venues, sorted.
    pub venues: Vec<String>,
    /// Distinct years, ascending.
    pub years: Vec<i32>,
    /// Distinct authors, sorted.
    pub authors: Vec<String>,
}

/// Criteria with the author needle lowercased once.
struct Predicate<'a> {
    criteria: &'a FilterCriteria,
    needle: Option<String>,
}

impl<'a> Predicate<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self { criteria, needle: criteria.author_needle().map(str::to_lowercase) }
    }

    fn matches(&self, paper: &Paper) -> bool {
        let c = self.criteria;
        c.year_min.is_none_or(|min| paper.year >= min)
            && c.year_max.is_none_or(|max| paper.year <= max)
            && c.citation_min.is_none_or(|min| paper.citations >= min)
            && c.citation_max.is_none_or(|max| paper.citations <= max)
            && self.needle.as_deref().is_none_or(|needle| paper.has_author_matching(needle))
            && c.active_venues().is_none_or(|venues| venues.contains(&paper.venue))
    }
}

/// Papers satisfying every supplied criterion, in input order.
///
/// Empty criteria return the input unchanged.
///
/// # Errors
///
/// Returns `Filter` for inverted year or citation ranges.
pub fn filter_papers(papers: &[Paper], criteria: &FilterCriteria) -> AnalysisResult<Vec<Paper>> {
    criteria.validate()?;
    if criteria.is_empty() {
        return Ok(papers.to_vec());
    }

    let predicate = Predicate::new(criteria);
    let kept: Vec<Paper> = papers.iter().filter(|p| predicate.matches(p)).cloned().collect();
    tracing::debug!(input = papers.len(), kept = kept.len(), "Applied filter");
    Ok(kept)
}

/// Distinct venues, years and authors, each sorted.
#[must_use]
pub fn filter_options(papers: &[Paper]) -> FilterOptions {
    let venues: BTreeSet<&str> = papers.iter().map(|p| p.venue.as_str()).collect();
    let years: BTreeSet<i32> = papers.iter().map(|p| p.year).collect();
    let authors: BTreeSet<&str> =
        papers.iter().flat_map(|p| p.authors.iter().map(String::as_str)).collect();

    FilterOptions {
        venues: venues.into_iter().map(str::to_string).collect(),
        years: years.into_iter().collect(),
        authors: authors.into_iter().map(str::to_string).collect(),
    }
}

/// Authors whose name contains `query` (case-insensitive), first-seen order.
#[must_use]
pub fn author_suggestions(papers: &[Paper], query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<String> = Vec::new();
    for author in papers.iter().flat_map(|p| p.authors.iter()) {
        if found.len() >= limit {
            break;
        }
        if author.to_lowercase().contains(&needle) && !found.contains(author) {
            found.push(author.clone());
        }
    }
    found
}
