//! Filter tools: filter_papers, filter_options.

use serde_json::json;

use super::{McpTool, ToolContext, criteria_schema, response_format_schema};
use crate::analytics::{author_suggestions, filter_options};
use crate::config::defaults;
use crate::error::ToolResult;
use crate::formatters::{self, compact_paper};
use crate::models::{FilterOptionsInput, FilterPapersInput, ResponseFormat};

/// List the papers matching filter criteria.
pub struct FilterPapersTool;

#[async_trait::async_trait]
impl McpTool for FilterPapersTool {
    fn name(&self) -> &'static str {
        "filter_papers"
    }

    fn description(&self) -> &'static str {
        "List loaded papers matching a year range, citation range, author substring and/or \
         venue set. All supplied criteria must hold."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "criteria": criteria_schema(),
                "limit": {
                    "type": "integer",
                    "default": 100,
                    "description": "Maximum papers to list"
                },
                "responseFormat": response_format_schema()
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: FilterPapersInput = serde_json::from_value(input)?;
        let store = ctx.store().await;
        let papers = store.filter(&params.criteria)?;

        match params.response_format {
            ResponseFormat::Markdown => Ok(formatters::format_papers_markdown(&papers, params.limit)),
            ResponseFormat::Json => {
                let shown: Vec<_> = papers.iter().take(params.limit).map(compact_paper).collect();
                Ok(serde_json::to_string(&json!({
                    "metadata": {
                        "totalPapers": store.len(),
                        "matched": papers.len(),
                        "returned": shown.len(),
                        "criteria": params.criteria,
                    },
                    "papers": shown,
                }))?)
            }
        }
    }
}

/// Available venues, years and authors, plus author suggestions.
pub struct FilterOptionsTool;

#[async_trait::async_trait]
impl McpTool for FilterOptionsTool {
    fn name(&self) -> &'static str {
        "filter_options"
    }

    fn description(&self) -> &'static str {
        "List the venues, years and authors present in the loaded papers. With authorQuery, \
         also suggest matching author names."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "authorQuery": {
                    "type": "string",
                    "description": "Partial author name (case-insensitive)"
                },
                "suggestionLimit": {
                    "type": "integer",
                    "default": defaults::AUTHOR_SUGGESTIONS,
                    "description": "Maximum author suggestions"
                },
                "responseFormat": response_format_schema()
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: FilterOptionsInput = serde_json::from_value(input)?;
        let store = ctx.store().await;
        let options = filter_options(store.papers());

        let limit = params.suggestion_limit.unwrap_or(defaults::AUTHOR_SUGGESTIONS);
        let suggestions = params
            .author_query
            .as_deref()
            .map(|query| author_suggestions(store.papers(), query, limit));

        match params.response_format {
            ResponseFormat::Markdown => {
                Ok(formatters::format_filter_options(&options, suggestions.as_deref()))
            }
            ResponseFormat::Json => Ok(serde_json::to_string(&json!({
                "venues": options.venues,
                "years": options.years,
                "authors": options.authors,
                "authorSuggestions": suggestions,
            }))?),
        }
    }
}
