//! Session tools: load_papers.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::ToolResult;
use crate::models::LoadPapersInput;
use crate::store::RecordStore;

/// Replace the session's paper collection.
pub struct LoadPapersTool;

#[async_trait::async_trait]
impl McpTool for LoadPapersTool {
    fn name(&self) -> &'static str {
        "load_papers"
    }

    fn description(&self) -> &'static str {
        "Load a collection of paper records for analysis, replacing any previously \
         loaded collection. Each record needs id, title, authors, year, venue and citations."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "papers": {
                    "type": "array",
                    "description": "Paper records",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {"type": ["string", "integer"]},
                            "title": {"type": "string"},
                            "authors": {"type": "array", "items": {"type": "string"}},
                            "year": {"type": "integer"},
                            "venue": {"type": "string"},
                            "citations": {"type": "integer", "minimum": 0},
                            "url": {"type": "string"}
                        },
                        "required": ["id", "title", "authors", "year", "venue", "citations"]
                    }
                }
            },
            "required": ["papers"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: LoadPapersInput = serde_json::from_value(input)?;
        let store = RecordStore::from_value(&params.papers)?;

        let count = store.len();
        let version = store.version();
        ctx.replace_store(store).await;

        Ok(serde_json::to_string(&json!({
            "loaded": count,
            "version": version.to_string(),
        }))?)
    }
}
