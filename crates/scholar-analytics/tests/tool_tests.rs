//! Tool tests through the shared tool context.
//!
//! Each test drives tools the way the MCP dispatcher does: JSON arguments
//! in, rendered text out.
#![allow(clippy::float_cmp)]

use scholar_analytics::config::AnalysisConfig;
use scholar_analytics::error::ToolError;
use scholar_analytics::tools::{McpTool, ToolContext, register_all_tools};
use serde_json::{Value, json};

fn papers_json() -> Value {
    json!([
        {"id": 1, "title": "Graph Algorithms", "authors": ["A", "B"], "year": 2020, "venue": "X", "citations": 10},
        {"id": 2, "title": "Graph Theory", "authors": ["B", "C"], "year": 2021, "venue": "Y", "citations": 5},
        {"id": 3, "title": "Learning on Graphs", "authors": ["A", "B"], "year": 2022, "venue": "X", "citations": 7,
         "url": "https://example.org/3"}
    ])
}

fn tool(name: &str) -> Box<dyn McpTool> {
    register_all_tools().into_iter().find(|t| t.name() == name).unwrap()
}

async fn loaded_context() -> ToolContext {
    let ctx = ToolContext::new(AnalysisConfig::default());
    tool("load_papers").execute(&ctx, json!({ "papers": papers_json() })).await.unwrap();
    ctx
}

async fn run_json(ctx: &ToolContext, name: &str, mut args: Value) -> Value {
    args["responseFormat"] = json!("json");
    let text = tool(name).execute(ctx, args).await.unwrap();
    serde_json::from_str(&text).unwrap()
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test]
async fn test_load_papers_reports_count() {
    let ctx = ToolContext::new(AnalysisConfig::for_testing());
    let text = tool("load_papers").execute(&ctx, json!({ "papers": papers_json() })).await.unwrap();
    let out: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(out["loaded"], 3);
    assert_eq!(ctx.store().await.len(), 3);
}

#[tokio::test]
async fn test_load_papers_rejects_bad_record_and_keeps_old_store() {
    let ctx = loaded_context().await;
    let bad = json!({ "papers": [{"id": 9, "title": "T", "authors": [], "year": 2020, "venue": "V", "citations": 1}] });

    let err = tool("load_papers").execute(&ctx, bad).await.unwrap_err();
    assert!(err.is_client_error());
    assert!(err.to_user_message().contains("authors"));
    assert_eq!(ctx.store().await.len(), 3);
}

// =============================================================================
// Analysis tools
// =============================================================================

#[tokio::test]
async fn test_analyze_papers_json_envelope() {
    let ctx = loaded_context().await;
    let out = run_json(&ctx, "analyze_papers", json!({})).await;

    assert_eq!(out["metadata"]["section"], "report");
    assert_eq!(out["metadata"]["totalPapers"], 3);
    assert_eq!(out["report"]["basic"]["totalCitations"], 22);
    assert_eq!(out["report"]["basic"]["hIndex"], 3);
}

#[tokio::test]
async fn test_analyze_papers_markdown_has_sections() {
    let ctx = loaded_context().await;
    let text = tool("analyze_papers").execute(&ctx, json!({})).await.unwrap();

    assert!(text.contains("h-index"));
    assert!(text.contains("---"));
}

#[tokio::test]
async fn test_analysis_is_served_from_cache() {
    let ctx = loaded_context().await;
    let first = ctx.report(&Default::default()).await.unwrap();
    let second = ctx.report(&Default::default()).await.unwrap();

    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_citation_metrics_with_filter() {
    let ctx = loaded_context().await;
    let out = run_json(&ctx, "citation_metrics", json!({ "criteria": { "venueSet": ["X"] } })).await;

    assert_eq!(out["metadata"]["totalPapers"], 2);
}

#[tokio::test]
async fn test_collaboration_network_for_author() {
    let ctx = loaded_context().await;
    let out = run_json(&ctx, "collaboration_network", json!({ "author": "A" })).await;
    let text = out.to_string();

    assert!(text.contains(r#""weight":2"#));
    assert!(!text.contains(r#""source":"B","target":"C""#));
}

#[tokio::test]
async fn test_collaboration_network_rejects_zero_min_weight() {
    let ctx = loaded_context().await;
    let err = tool("collaboration_network").execute(&ctx, json!({ "minWeight": 0 })).await.unwrap_err();

    assert!(matches!(err, ToolError::Validation { .. }));
}

#[tokio::test]
async fn test_impact_rankings_limit() {
    let ctx = loaded_context().await;
    let text = run_json(&ctx, "impact_rankings", json!({ "limit": 1 })).await.to_string();

    assert!(text.contains(r#""venue":"X""#));
    assert!(!text.contains(r#""venue":"Y""#));
}

#[tokio::test]
async fn test_inverted_filter_is_client_error() {
    let ctx = loaded_context().await;
    let err = tool("publication_trends")
        .execute(&ctx, json!({ "criteria": { "yearMin": 2022, "yearMax": 2020 } }))
        .await
        .unwrap_err();

    assert!(err.is_client_error());
    assert!(err.to_user_message().starts_with("Invalid filter"));
}

// =============================================================================
// Filter and export tools
// =============================================================================

#[tokio::test]
async fn test_filter_papers_json() {
    let ctx = loaded_context().await;
    let out = run_json(&ctx, "filter_papers", json!({ "criteria": { "authorSubstring": "c" }, "limit": 5 })).await;

    assert_eq!(out["metadata"]["totalPapers"], 3);
    assert_eq!(out["metadata"]["matched"], 1);
    assert_eq!(out["papers"][0]["id"], 2);
}

#[tokio::test]
async fn test_filter_options_with_suggestions() {
    let ctx = loaded_context().await;
    let out = run_json(&ctx, "filter_options", json!({ "authorQuery": "b" })).await;

    assert_eq!(out["venues"], json!(["X", "Y"]));
    assert_eq!(out["years"], json!([2020, 2021, 2022]));
    assert_eq!(out["authorSuggestions"], json!(["B"]));
}

#[tokio::test]
async fn test_export_papers_bibtex() {
    let ctx = loaded_context().await;
    let text = tool("export_papers")
        .execute(&ctx, json!({ "format": "bibtex", "criteria": { "venueSet": ["X"] } }))
        .await
        .unwrap();

    assert_eq!(text.matches("@article{").count(), 2);
    assert!(text.contains("url = {https://example.org/3}"));
}

#[tokio::test]
async fn test_empty_session_reports_zeroes() {
    let ctx = ToolContext::new(AnalysisConfig::for_testing());
    let out = run_json(&ctx, "citation_metrics", json!({})).await;

    assert_eq!(out["metadata"]["totalPapers"], 0);
}
