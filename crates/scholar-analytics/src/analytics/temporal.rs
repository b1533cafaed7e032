//! Temporal trends: per-year buckets and year-over-year growth.
//!
//! Years are keyed in a `BTreeMap`, so iteration is ascending and numeric.
//! Years without papers are skipped, never synthesized; consumers must not
//! assume a contiguous axis.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::Paper;

/// Papers published in one year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBucket {
    /// Papers published this year.
    pub paper_count: usize,
    /// Citations of those papers, saturating at `u64::MAX`.
    pub citation_sum: u64,
    /// Distinct venues this year.
    pub venues: BTreeSet<String>,
    /// Distinct authors this year.
    pub authors: BTreeSet<String>,
}

/// One row of the growth table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTrend {
    /// Publication year.
    pub year: i32,
    /// Papers published this year.
    pub papers: usize,
    /// Citations of those papers.
    pub citations: u64,
    /// Distinct venues this year.
    pub venue_count: usize,
    /// Distinct authors this year.
    pub author_count: usize,
    /// Percent change in papers from the previous year with data.
    pub paper_growth_rate: f64,
    /// Percent change in citations from the previous year with data.
    pub citation_growth_rate: f64,
}

/// Summary of the growth table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthSummary {
    /// Mean paper growth rate, first year excluded.
    pub average_paper_growth_rate: f64,
    /// Mean citation growth rate, first year excluded.
    pub average_citation_growth_rate: f64,
    /// Year with the most papers (earliest on ties).
    pub peak_year: Option<i32>,
    /// Year with the highest citation sum (earliest on ties).
    pub most_cited_year: Option<i32>,
}

/// Temporal analysis result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalTrends {
    /// Raw per-year aggregates, ascending; years without papers are absent.
    pub yearly: BTreeMap<i32, YearBucket>,
    /// Per-year rows with growth rates, ascending.
    pub trends: Vec<YearTrend>,
    /// Averages and extreme years of the trend rows.
    pub growth: GrowthSummary,
}

/// Group papers by publication year.
#[must_use]
pub fn year_buckets(papers: &[Paper]) -> BTreeMap<i32, YearBucket> {
    let mut yearly: BTreeMap<i32, YearBucket> = BTreeMap::new();
    for paper in papers {
        let bucket = yearly.entry(paper.year).or_default();
        bucket.paper_count += 1;
        bucket.citation_sum = bucket.citation_sum.saturating_add(paper.citations);
        bucket.venues.insert(paper.venue.clone());
        bucket.authors.extend(paper.authors.iter().cloned());
    }
    yearly
}

/// Percent growth from `previous` to `current`; 0 when `previous` is 0.
#[must_use]
pub fn growth_rate(previous: u64, current: u64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    (current as f64 - previous as f64) / previous as f64 * 100.0
}

/// Compute per-year buckets, growth rates and their summary.
#[must_use]
pub fn temporal_trends(papers: &[Paper]) -> TemporalTrends {
    let yearly = year_buckets(papers);

    let mut trends = Vec::with_capacity(yearly.len());
    let mut previous: Option<&YearBucket> = None;
    for (&year, bucket) in &yearly {
        let (paper_growth_rate, citation_growth_rate) = previous.map_or((0.0, 0.0), |prev| {
            (
                growth_rate(prev.paper_count as u64, bucket.paper_count as u64),
                growth_rate(prev.citation_sum, bucket.citation_sum),
            )
        });

        trends.push(YearTrend {
            year,
            papers: bucket.paper_count,
            citations: bucket.citation_sum,
            venue_count: bucket.venues.len(),
            author_count: bucket.authors.len(),
            paper_growth_rate,
            citation_growth_rate,
        });
        previous = Some(bucket);
    }

    let growth = summarize(&trends);
    TemporalTrends { yearly, trends, growth }
}

fn summarize(trends: &[YearTrend]) -> GrowthSummary {
    // The first year has no predecessor and is excluded from the averages.
    let chained = trends.get(1..).unwrap_or_default();
    let average = |f: fn(&YearTrend) -> f64| {
        if chained.is_empty() {
            0.0
        } else {
            chained.iter().map(f).sum::<f64>() / chained.len() as f64
        }
    };

    // Trends are in ascending year order, so strict comparisons keep the earliest year on ties.
    let mut peak: Option<&YearTrend> = None;
    let mut most_cited: Option<&YearTrend> = None;
    for trend in trends {
        if peak.is_none_or(|p| trend.papers > p.papers) {
            peak = Some(trend);
        }
        if most_cited.is_none_or(|m| trend.citations > m.citations) {
            most_cited = Some(trend);
        }
    }

    GrowthSummary {
        average_paper_growth_rate: average(|t| t.paper_growth_rate),
        average_citation_growth_rate: average(|t| t.citation_growth_rate),
        peak_year: peak.map(|t| t.year),
        most_cited_year: most_cited.map(|t| t.year),
    }
}
