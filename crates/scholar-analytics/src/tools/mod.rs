//! MCP tool implementations.
//!
//! Each tool module provides tools that:
//! 1. Parse and validate input parameters
//! 2. Run the analytics engine over the session's record store
//! 3. Format results as Markdown or JSON

mod analysis;
mod export;
mod filtering;
mod session;

pub use analysis::*;
pub use export::*;
pub use filtering::*;
pub use session::*;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::analytics::AnalysisReport;
use crate::cache::AnalysisCache;
use crate::config::AnalysisConfig;
use crate::error::ToolResult;
use crate::models::FilterCriteria;
use crate::store::RecordStore;

/// Tool execution context.
///
/// Holds the session's record store. Loading papers swaps the whole store,
/// so readers always see a consistent snapshot.
pub struct ToolContext {
    /// Current record store.
    store: RwLock<Arc<RecordStore>>,

    /// Engine configuration.
    pub config: Arc<AnalysisConfig>,

    /// Memoized analysis reports.
    pub cache: AnalysisCache,
}

impl ToolContext {
    /// Create a new tool context with an empty store.
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_store(config, RecordStore::empty())
    }

    /// Create a tool context preloaded with `store`.
    #[must_use]
    pub fn with_store(config: AnalysisConfig, store: RecordStore) -> Self {
        let cache = AnalysisCache::new(&config);
        Self { store: RwLock::new(Arc::new(store)), config: Arc::new(config), cache }
    }

    /// Snapshot of the current store.
    pub async fn store(&self) -> Arc<RecordStore> {
        Arc::clone(&*self.store.read().await)
    }

    /// Replace the store. Cached reports for the old store become unreachable.
    pub async fn replace_store(&self, store: RecordStore) {
        tracing::info!(papers = store.len(), version = %store.version(), "Replacing record store");
        *self.store.write().await = Arc::new(store);
        self.cache.invalidate_all();
    }

    /// Analysis report for the current store filtered by `criteria`.
    ///
    /// # Errors
    ///
    /// Returns error for inconsistent criteria.
    pub async fn report(&self, criteria: &FilterCriteria) -> ToolResult<Arc<AnalysisReport>> {
        let store = self.store().await;
        Ok(self.cache.report(&store, criteria, &self.config).await?)
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext").field("cache", &self.cache).finish_non_exhaustive()
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "analyze_papers").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// JSON Schema for the optional `criteria` object shared by most tools.
#[must_use]
pub fn criteria_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "description": "Optional filter applied before the tool runs",
        "properties": {
            "yearMin": {"type": "integer"},
            "yearMax": {"type": "integer"},
            "citationMin": {"type": "integer", "minimum": 0},
            "citationMax": {"type": "integer", "minimum": 0},
            "authorSubstring": {"type": "string", "description": "Case-insensitive match on any author"},
            "venueSet": {"type": "array", "items": {"type": "string"}, "description": "Exact venue names"}
        }
    })
}

/// JSON Schema for `responseFormat`.
#[must_use]
pub fn response_format_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": ["markdown", "json"],
        "default": "markdown"
    })
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        // Session tools (1)
        Box::new(session::LoadPapersTool),

        // Analysis tools (6)
        Box::new(analysis::AnalyzePapersTool),
        Box::new(analysis::CitationMetricsTool),
        Box::new(analysis::PublicationTrendsTool),
        Box::new(analysis::CollaborationNetworkTool),
        Box::new(analysis::ImpactRankingsTool),
        Box::new(analysis::TopicAnalysisTool),

        // Filter tools (2)
        Box::new(filtering::FilterPapersTool),
        Box::new(filtering::FilterOptionsTool),

        // Export tools (1)
        Box::new(export::ExportPapersTool),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Paper;

    #[test]
    fn test_tool_names_are_unique() {
        let tools = register_all_tools();
        let mut names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), tools.len());
        assert_eq!(tools.len(), 10);
    }

    #[tokio::test]
    async fn test_replace_store_changes_version() {
        let ctx = ToolContext::new(AnalysisConfig::for_testing());
        let before = ctx.store().await.version();
        ctx.replace_store(RecordStore::new(vec![Paper::new(1, "T", &["A"], 2020, "V", 1)])).await;
        let after = ctx.store().await;
        assert_ne!(before, after.version());
        assert_eq!(after.len(), 1);
    }
}
