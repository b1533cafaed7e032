//! Analysis tools: analyze_papers, citation_metrics, publication_trends,
//! collaboration_network, impact_rankings, topic_analysis.

use serde_json::json;

use super::{McpTool, ToolContext, criteria_schema, response_format_schema};
use crate::analytics::network::CollaborationEdge;
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{AnalysisInput, CollaborationNetworkInput, ImpactRankingsInput, ResponseFormat};

fn analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "criteria": criteria_schema(),
            "responseFormat": response_format_schema()
        }
    })
}

/// Full composed report.
pub struct AnalyzePapersTool;

#[async_trait::async_trait]
impl McpTool for AnalyzePapersTool {
    fn name(&self) -> &'static str {
        "analyze_papers"
    }

    fn description(&self) -> &'static str {
        "Run every analysis over the loaded papers (optionally filtered): citation metrics, \
         publication trends, collaboration network, impact rankings and topics."
    }

    fn input_schema(&self) -> serde_json::Value {
        analysis_schema()
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: AnalysisInput = serde_json::from_value(input)?;
        let report = ctx.report(&params.criteria).await?;

        match params.response_format {
            ResponseFormat::Markdown => Ok(formatters::format_report(&report)),
            ResponseFormat::Json => Ok(serde_json::to_string(&formatters::envelope(
                "report",
                report.basic.total_papers,
                &*report,
            )?)?),
        }
    }
}

/// Citation statistics and h-index.
pub struct CitationMetricsTool;

#[async_trait::async_trait]
impl McpTool for CitationMetricsTool {
    fn name(&self) -> &'static str {
        "citation_metrics"
    }

    fn description(&self) -> &'static str {
        "Citation statistics for the loaded papers: totals, mean, median, standard deviation, \
         h-index, year range and citation distribution."
    }

    fn input_schema(&self) -> serde_json::Value {
        analysis_schema()
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: AnalysisInput = serde_json::from_value(input)?;
        let report = ctx.report(&params.criteria).await?;
        let metrics = &report.basic;

        match params.response_format {
            ResponseFormat::Markdown => Ok(formatters::format_basic_metrics(metrics)),
            ResponseFormat::Json => Ok(serde_json::to_string(&formatters::envelope(
                "metrics",
                metrics.total_papers,
                metrics,
            )?)?),
        }
    }
}

/// Year-by-year publication trends.
pub struct PublicationTrendsTool;

#[async_trait::async_trait]
impl McpTool for PublicationTrendsTool {
    fn name(&self) -> &'static str {
        "publication_trends"
    }

    fn description(&self) -> &'static str {
        "Papers, citations, venues and authors per publication year, with year-over-year \
         growth rates, peak year and most cited year."
    }

    fn input_schema(&self) -> serde_json::Value {
        analysis_schema()
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: AnalysisInput = serde_json::from_value(input)?;
        let report = ctx.report(&params.criteria).await?;

        match params.response_format {
            ResponseFormat::Markdown => Ok(formatters::format_temporal_trends(&report.temporal)),
            ResponseFormat::Json => Ok(serde_json::to_string(&formatters::envelope(
                "trends",
                report.basic.total_papers,
                &report.temporal,
            )?)?),
        }
    }
}

/// Co-authorship graph.
pub struct CollaborationNetworkTool;

#[async_trait::async_trait]
impl McpTool for CollaborationNetworkTool {
    fn name(&self) -> &'static str {
        "collaboration_network"
    }

    fn description(&self) -> &'static str {
        "Build the co-authorship network of the loaded papers. Edges are weighted by shared \
         papers. Optionally focus on one author's collaborations."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "criteria": criteria_schema(),
                "author": {
                    "type": "string",
                    "description": "Only report collaborations of this author (exact name)"
                },
                "minWeight": {
                    "type": "integer",
                    "default": 1,
                    "minimum": 1,
                    "description": "Minimum shared papers to include an edge"
                },
                "maxEdges": {
                    "type": "integer",
                    "default": 100,
                    "description": "Maximum edges to return"
                },
                "responseFormat": response_format_schema()
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: CollaborationNetworkInput = serde_json::from_value(input)?;
        if params.min_weight == 0 {
            return Err(ToolError::validation("minWeight", "must be at least 1"));
        }

        let report = ctx.report(&params.criteria).await?;
        let network = &report.network;

        let mut edges: Vec<&CollaborationEdge> = match params.author.as_deref() {
            Some(author) => network.edges_of(author),
            None => {
                let mut all: Vec<&CollaborationEdge> = network.edges.iter().collect();
                all.sort_by(|a, b| b.weight.cmp(&a.weight));
                all
            }
        };
        edges.retain(|e| e.weight >= params.min_weight as usize);
        edges.truncate(params.max_edges);

        tracing::debug!(edges = edges.len(), author = ?params.author, "Selected network edges");

        match params.response_format {
            ResponseFormat::Markdown => Ok(formatters::format_network(network, &edges)),
            ResponseFormat::Json => Ok(serde_json::to_string(&json!({
                "metadata": {
                    "totalPapers": report.basic.total_papers,
                    "author": params.author,
                    "minWeight": params.min_weight,
                    "generatedAt": chrono::Utc::now().to_rfc3339(),
                },
                "metrics": network.metrics,
                "nodes": network.nodes,
                "edges": edges,
            }))?),
        }
    }
}

/// Venue and author rankings.
pub struct ImpactRankingsTool;

#[async_trait::async_trait]
impl McpTool for ImpactRankingsTool {
    fn name(&self) -> &'static str {
        "impact_rankings"
    }

    fn description(&self) -> &'static str {
        "Rank venues by impact factor (citations per paper) and authors by total citations, \
         with each author's own h-index."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "criteria": criteria_schema(),
                "limit": {
                    "type": "integer",
                    "default": 20,
                    "minimum": 1,
                    "description": "Rows per ranking"
                },
                "responseFormat": response_format_schema()
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: ImpactRankingsInput = serde_json::from_value(input)?;
        if params.limit == 0 {
            return Err(ToolError::validation("limit", "must be at least 1"));
        }

        let report = ctx.report(&params.criteria).await?;
        let rankings = report.impact.clone().truncated(params.limit);

        match params.response_format {
            ResponseFormat::Markdown => Ok(formatters::format_impact_rankings(&rankings)),
            ResponseFormat::Json => Ok(serde_json::to_string(&formatters::envelope(
                "rankings",
                report.basic.total_papers,
                &rankings,
            )?)?),
        }
    }
}

/// Title topic extraction.
pub struct TopicAnalysisTool;

#[async_trait::async_trait]
impl McpTool for TopicAnalysisTool {
    fn name(&self) -> &'static str {
        "topic_analysis"
    }

    fn description(&self) -> &'static str {
        "Extract topics from paper titles: most frequent words with citation impact, word \
         co-occurrence, per-year word counts and emerging topics."
    }

    fn input_schema(&self) -> serde_json::Value {
        analysis_schema()
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: AnalysisInput = serde_json::from_value(input)?;
        let report = ctx.report(&params.criteria).await?;

        match params.response_format {
            ResponseFormat::Markdown => Ok(formatters::format_topics(&report.topics)),
            ResponseFormat::Json => Ok(serde_json::to_string(&formatters::envelope(
                "topics",
                report.basic.total_papers,
                &report.topics,
            )?)?),
        }
    }
}
