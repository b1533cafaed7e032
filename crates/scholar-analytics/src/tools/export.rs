//! Export tools: export_papers.

use serde_json::json;

use super::{McpTool, ToolContext, criteria_schema};
use crate::error::{ToolError, ToolResult};
use crate::export::export_papers;
use crate::models::ExportPapersInput;

/// Reference export of the (filtered) record store.
pub struct ExportPapersTool;

#[async_trait::async_trait]
impl McpTool for ExportPapersTool {
    fn name(&self) -> &'static str {
        "export_papers"
    }

    fn description(&self) -> &'static str {
        "Export the loaded papers (optionally filtered) as CSV, BibTeX, RIS or JSON."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "criteria": criteria_schema(),
                "format": {
                    "type": "string",
                    "enum": ["csv", "bibtex", "ris", "json"],
                    "default": "csv"
                }
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: ExportPapersInput = serde_json::from_value(input)?;
        let store = ctx.store().await;
        let papers = store.filter(&params.criteria)?;

        tracing::info!(format = params.format.as_str(), papers = papers.len(), "Exporting papers");
        export_papers(&papers, params.format)
            .map_err(|e| ToolError::internal(format!("Failed to render export: {e}")))
    }
}
