//! Bibliometric calculators.
//!
//! Every calculator is a pure function over `&[Paper]`. They share no state,
//! so [`analyze`] runs them on the rayon pool and composes the results.

#![warn(missing_docs)]

pub mod basic;
pub mod filter;
pub mod impact;
pub mod network;
pub mod temporal;
pub mod topics;

pub use basic::{BasicMetrics, basic_metrics, h_index};
pub use filter::{FilterOptions, author_suggestions, filter_options, filter_papers};
pub use impact::{ImpactRankings, impact_rankings};
pub use network::{CollaborationNetwork, collaboration_network};
pub use temporal::{TemporalTrends, temporal_trends};
pub use topics::{TopicAnalysis, topic_analysis};

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::models::{FilterCriteria, Paper};

/// Composed result of every calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Citation totals, h-index and distribution.
    pub basic: BasicMetrics,
    /// Per-year counts and growth rates.
    pub temporal: TemporalTrends,
    /// Co-authorship graph.
    pub network: CollaborationNetwork,
    /// Venue and author rankings.
    pub impact: ImpactRankings,
    /// Title word statistics.
    pub topics: TopicAnalysis,
}

/// Run all calculators over `papers`.
#[must_use]
pub fn analyze(papers: &[Paper], config: &AnalysisConfig) -> AnalysisReport {
    let ((basic, temporal), (network, (impact, topics))) = rayon::join(
        || rayon::join(|| basic_metrics(papers), || temporal_trends(papers)),
        || {
            rayon::join(
                || collaboration_network(papers, config.top_collaborators),
                || rayon::join(|| impact_rankings(papers), || topic_analysis(papers, config)),
            )
        },
    );

    tracing::debug!(papers = papers.len(), "Analysis pass complete");

    AnalysisReport { basic, temporal, network, impact, topics }
}

/// Filter `papers`, then analyze the subset.
///
/// # Errors
///
/// Returns `Filter` for inconsistent criteria.
pub fn analyze_filtered(
    papers: &[Paper],
    criteria: &FilterCriteria,
    config: &AnalysisConfig,
) -> AnalysisResult<AnalysisReport> {
    let subset = filter_papers(papers, criteria)?;
    Ok(analyze(&subset, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Paper> {
        vec![
            Paper::new(1, "Graph Algorithms", &["A", "B"], 2020, "X", 10),
            Paper::new(2, "Graph Theory", &["B", "C"], 2021, "Y", 5),
        ]
    }

    #[test]
    fn test_analyze_composes_all_sections() {
        let report = analyze(&sample(), &AnalysisConfig::for_testing());
        assert_eq!(report.basic.total_papers, 2);
        assert_eq!(report.basic.h_index, 2);
        assert_eq!(report.temporal.trends.len(), 2);
        assert_eq!(report.network.edges.len(), 2);
        assert_eq!(report.impact.venues.len(), 2);
        assert_eq!(report.topics.top_words[0].word, "graph");
    }

    #[test]
    fn test_analyze_filtered_runs_on_subset() {
        let criteria = FilterCriteria::new().years(Some(2021), None);
        let report = analyze_filtered(&sample(), &criteria, &AnalysisConfig::for_testing()).unwrap();
        assert_eq!(report.basic.total_papers, 1);
        assert_eq!(report.network.edges.len(), 1);
    }

    #[test]
    fn test_empty_report_is_default() {
        let report = analyze(&[], &AnalysisConfig::for_testing());
        assert_eq!(report, AnalysisReport::default());
        assert!(report.basic.year_range().is_err());
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = analyze(&sample(), &AnalysisConfig::for_testing());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["basic"]["hIndex"], 2);
        assert!(value["topics"]["topWords"].is_array());
    }
}
