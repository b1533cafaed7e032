//! Input models for MCP tool parameters and HTTP request bodies.

use serde::{Deserialize, Serialize};

use super::{ExportFormat, FilterCriteria, ResponseFormat};

/// Input for replacing the session's paper collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPapersInput {
    /// Paper records (validated on load).
    pub papers: serde_json::Value,
}

/// Input shared by the analysis tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    /// Optional filter applied before analysis.
    #[serde(default)]
    pub criteria: FilterCriteria,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Input for the collaboration network tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationNetworkInput {
    /// Optional filter applied before analysis.
    #[serde(default)]
    pub criteria: FilterCriteria,

    /// Only report edges touching this author (exact name).
    #[serde(default)]
    pub author: Option<String>,

    /// Minimum shared papers for an edge to be reported.
    #[serde(default = "default_min_weight")]
    pub min_weight: u32,

    /// Maximum edges to report.
    #[serde(default = "default_max_edges")]
    pub max_edges: usize,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

fn default_min_weight() -> u32 {
    1
}

fn default_max_edges() -> usize {
    100
}

/// Input for the impact ranking tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactRankingsInput {
    /// Optional filter applied before analysis.
    #[serde(default)]
    pub criteria: FilterCriteria,

    /// Rows per ranking.
    #[serde(default = "default_ranking_limit")]
    pub limit: usize,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

fn default_ranking_limit() -> usize {
    20
}

/// Input for the paper filter tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPapersInput {
    /// Filter to apply.
    #[serde(default)]
    pub criteria: FilterCriteria,

    /// Maximum papers to list.
    #[serde(default = "default_filter_limit")]
    pub limit: usize,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

fn default_filter_limit() -> usize {
    100
}

/// Input for the filter options tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsInput {
    /// Partial author name to suggest completions for.
    #[serde(default)]
    pub author_query: Option<String>,

    /// Maximum author suggestions.
    #[serde(default)]
    pub suggestion_limit: Option<usize>,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Input for the export tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPapersInput {
    /// Optional filter applied before export.
    #[serde(default)]
    pub criteria: FilterCriteria,

    /// Export format.
    #[serde(default)]
    pub format: ExportFormat,
}

/// Body of HTTP API requests.
///
/// When `papers` is absent the session's loaded collection is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    /// Inline paper records.
    #[serde(default)]
    pub papers: Option<serde_json::Value>,

    /// Optional filter.
    #[serde(default)]
    pub criteria: FilterCriteria,
}
