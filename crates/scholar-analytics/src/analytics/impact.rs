//! Venue and author impact rankings.
//!
//! Independent of the collaboration network: only citation sums are needed.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::basic::{citation_total, h_index};
use crate::models::Paper;

/// Per-venue aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueStat {
    /// Papers at the venue.
    pub papers: usize,
    /// Citations of those papers, saturating at `u64::MAX`.
    pub citations: u64,
    /// Distinct authors at the venue.
    pub authors: BTreeSet<String>,
}

impl VenueStat {
    /// Total citations divided by paper count.
    #[must_use]
    pub fn impact_factor(&self) -> f64 {
        if self.papers == 0 {
            return 0.0;
        }
        self.citations as f64 / self.papers as f64
    }
}

/// Row of the venue ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueImpact {
    /// Venue name.
    pub venue: String,
    /// Papers at the venue.
    pub papers: usize,
    /// Citations of those papers.
    pub citations: u64,
    /// Citations per paper.
    pub impact_factor: f64,
    /// Distinct authors at the venue.
    pub unique_authors: usize,
}

/// Row of the author ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorImpact {
    /// Author name.
    pub author: String,
    /// Papers the author appears on.
    pub papers: usize,
    /// Citations of those papers.
    pub citations: u64,
    /// h-index over the author's own papers.
    pub h_index: usize,
    /// Distinct venues the author published in.
    pub venue_count: usize,
    /// Citations per paper.
    pub average_citations: f64,
}

/// Both rankings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactRankings {
    /// Descending impact factor.
    pub venues: Vec<VenueImpact>,
    /// Descending total citations.
    pub authors: Vec<AuthorImpact>,
}

impl ImpactRankings {
    /// Keep only the first `limit` rows of each ranking.
    #[must_use]
    pub fn truncated(mut self, limit: usize) -> Self {
        self.venues.truncate(limit);
        self.authors.truncate(limit);
        self
    }
}

/// Aggregate papers per venue.
#[must_use]
pub fn venue_stats(papers: &[Paper]) -> BTreeMap<&str, VenueStat> {
    let mut venues: BTreeMap<&str, VenueStat> = BTreeMap::new();
    for paper in papers {
        let stat = venues.entry(paper.venue.as_str()).or_default();
        stat.papers += 1;
        stat.citations = stat.citations.saturating_add(paper.citations);
        stat.authors.extend(paper.authors.iter().cloned());
    }
    venues
}

/// Group papers by author once, so per-author work never rescans the full set.
#[must_use]
pub fn papers_by_author(papers: &[Paper]) -> BTreeMap<&str, Vec<&Paper>> {
    let mut grouped: BTreeMap<&str, Vec<&Paper>> = BTreeMap::new();
    for paper in papers {
        for author in paper.distinct_authors() {
            grouped.entry(author).or_default().push(paper);
        }
    }
    grouped
}

/// Venue ranking by impact factor.
///
/// The sort is stable over name-ordered venues, so ties stay alphabetical.
#[must_use]
pub fn venue_ranking(papers: &[Paper]) -> Vec<VenueImpact> {
    let mut ranking: Vec<VenueImpact> = venue_stats(papers)
        .into_iter()
        .map(|(venue, stat)| VenueImpact {
            venue: venue.to_string(),
            papers: stat.papers,
            citations: stat.citations,
            impact_factor: stat.impact_factor(),
            unique_authors: stat.authors.len(),
        })
        .collect();
    ranking.sort_by(|a, b| b.impact_factor.total_cmp(&a.impact_factor));
    ranking
}

/// Author ranking by total citations, each with their own h-index.
#[must_use]
pub fn author_ranking(papers: &[Paper]) -> Vec<AuthorImpact> {
    let mut ranking: Vec<AuthorImpact> = papers_by_author(papers)
        .into_iter()
        .map(|(author, own)| {
            let citations: Vec<u64> = own.iter().map(|p| p.citations).collect();
            let total = citation_total(&citations);
            let venues: BTreeSet<&str> = own.iter().map(|p| p.venue.as_str()).collect();
            AuthorImpact {
                author: author.to_string(),
                papers: own.len(),
                citations: total,
                h_index: h_index(&citations),
                venue_count: venues.len(),
                average_citations: total as f64 / own.len() as f64,
            }
        })
        .collect();
    ranking.sort_by(|a, b| b.citations.cmp(&a.citations));
    ranking
}

/// Compute both rankings.
#[must_use]
pub fn impact_rankings(papers: &[Paper]) -> ImpactRankings {
    ImpactRankings { venues: venue_ranking(papers), authors: author_ranking(papers) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_ranking_by_impact_factor() {
        let papers = vec![
            Paper::new(1, "T1", &["A"], 2020, "Low", 2),
            Paper::new(2, "T2", &["A"], 2020, "Low", 4),
            Paper::new(3, "T3", &["B", "C"], 2020, "High", 30),
        ];
        let venues = venue_ranking(&papers);
        assert_eq!(venues[0].venue, "High");
        assert!((venues[0].impact_factor - 30.0).abs() < f64::EPSILON);
        assert_eq!(venues[0].unique_authors, 2);
        assert!((venues[1].impact_factor - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_venue_ties_stay_alphabetical() {
        let papers = vec![
            Paper::new(1, "T1", &["A"], 2020, "Zeta", 5),
            Paper::new(2, "T2", &["A"], 2020, "Alpha", 5),
        ];
        let names: Vec<String> = venue_ranking(&papers).into_iter().map(|v| v.venue).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_author_h_index_uses_own_papers() {
        let papers = vec![
            Paper::new(1, "T1", &["A", "B"], 2020, "V", 10),
            Paper::new(2, "T2", &["A"], 2021, "W", 8),
            Paper::new(3, "T3", &["A"], 2022, "V", 1),
            Paper::new(4, "T4", &["B"], 2022, "V", 100),
        ];
        let authors = author_ranking(&papers);

        let b = authors.iter().find(|a| a.author == "B").unwrap();
        assert_eq!(b.citations, 110);
        assert_eq!(b.h_index, 2);

        let a = authors.iter().find(|a| a.author == "A").unwrap();
        assert_eq!(a.papers, 3);
        assert_eq!(a.h_index, 2);
        assert_eq!(a.venue_count, 2);

        assert_eq!(authors[0].author, "B");
    }

    #[test]
    fn test_truncated() {
        let papers: Vec<Paper> =
            (0..5).map(|i| Paper::new(i, "T", &["A"], 2020, format!("V{i}"), 1)).collect();
        let rankings = impact_rankings(&papers).truncated(2);
        assert_eq!(rankings.venues.len(), 2);
        assert_eq!(rankings.authors.len(), 1);
    }
}
