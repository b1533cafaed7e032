//! HTTP transport: REST analysis API plus a single-request MCP endpoint.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::protocol::{JsonRpcRequest, JsonRpcResponse, PARSE_ERROR, handle_request};
use crate::analytics::{AnalysisReport, author_suggestions, filter_options};
use crate::cache::compute_report;
use crate::config::defaults;
use crate::error::{AnalysisError, ToolError};
use crate::export::export_papers;
use crate::models::{ApiRequest, ExportFormat};
use crate::store::RecordStore;
use crate::tools::{McpTool, ToolContext};

/// Shared state for HTTP handlers.
pub struct HttpState {
    pub tools: Vec<Box<dyn McpTool>>,
    pub ctx: ToolContext,
}

/// Query parameters for `GET /api/filters`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersQuery {
    author_query: Option<String>,
    suggestion_limit: Option<usize>,
}

/// Error body `{"error": message}` with a 400 or 500 status.
#[derive(Debug)]
pub struct ApiError(ToolError);

impl From<ToolError> for ApiError {
    fn from(err: ToolError) -> Self {
        Self(err)
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        Self(ToolError::Analysis(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %self.0, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_user_message() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Create the HTTP router.
pub fn create_router(tools: Vec<Box<dyn McpTool>>, ctx: ToolContext) -> Router {
    let state = Arc::new(HttpState { tools, ctx });

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/filter", post(handle_filter))
        .route("/api/filters", get(handle_filters))
        .route("/api/export/{format}", post(handle_export))
        .route("/mcp", post(handle_mcp_post))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let store = state.ctx.store().await;
    Json(json!({
        "status": "ok",
        "service": "scholar-analytics",
        "version": env!("CARGO_PKG_VERSION"),
        "papers": store.len(),
        "tools": state.tools.len()
    }))
}

/// Inline papers if the body carries them, else the session store.
async fn resolve_store(state: &HttpState, body: &ApiRequest) -> ApiResult<Arc<RecordStore>> {
    match &body.papers {
        Some(papers) => Ok(Arc::new(RecordStore::from_value(papers)?)),
        None => Ok(state.ctx.store().await),
    }
}

fn parse_body(body: Result<Json<ApiRequest>, JsonRejection>) -> ApiResult<ApiRequest> {
    body.map(|Json(req)| req)
        .map_err(|rejection| ToolError::validation("body", rejection.body_text()).into())
}

async fn handle_analyze(
    State(state): State<Arc<HttpState>>,
    body: Result<Json<ApiRequest>, JsonRejection>,
) -> ApiResult<Json<AnalysisReport>> {
    let body = parse_body(body)?;
    let report = analysis_for(&state, &body).await?;

    tracing::info!(papers = report.basic.total_papers, "Analysis served");
    Ok(Json(AnalysisReport::clone(&report)))
}

/// Inline papers get a fresh store version per request, so their reports
/// bypass the cache. Only the session store is memoized.
async fn analysis_for(state: &HttpState, body: &ApiRequest) -> ApiResult<Arc<AnalysisReport>> {
    match &body.papers {
        Some(papers) => {
            let store = RecordStore::from_value(papers)?;
            Ok(Arc::new(compute_report(&store, &body.criteria, &state.ctx.config).await?))
        }
        None => Ok(state.ctx.report(&body.criteria).await?),
    }
}

async fn handle_filter(
    State(state): State<Arc<HttpState>>,
    body: Result<Json<ApiRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let body = parse_body(body)?;
    let store = resolve_store(&state, &body).await?;
    let papers = store.filter(&body.criteria)?;

    Ok(Json(json!({
        "total": store.len(),
        "count": papers.len(),
        "papers": papers,
    })))
}

async fn handle_filters(
    State(state): State<Arc<HttpState>>,
    Query(query): Query<FiltersQuery>,
) -> impl IntoResponse {
    let store = state.ctx.store().await;
    let options = filter_options(store.papers());
    let limit = query.suggestion_limit.unwrap_or(defaults::AUTHOR_SUGGESTIONS);
    let suggestions = query
        .author_query
        .as_deref()
        .map(|q| author_suggestions(store.papers(), q, limit));

    Json(json!({
        "venues": options.venues,
        "years": options.years,
        "authors": options.authors,
        "authorSuggestions": suggestions,
    }))
}

async fn handle_export(
    State(state): State<Arc<HttpState>>,
    Path(format): Path<String>,
    body: Result<Json<ApiRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let format: ExportFormat =
        format.parse().map_err(|e: String| ToolError::validation("format", e))?;
    let body = parse_body(body)?;
    let store = resolve_store(&state, &body).await?;
    let papers = store.filter(&body.criteria)?;
    let output = export_papers(&papers, format)
        .map_err(|e| ToolError::internal(format!("Failed to render export: {e}")))?;

    let disposition = format!("attachment; filename=\"papers.{}\"", format.extension());
    Ok((
        [(header::CONTENT_TYPE, format.mime_type().to_string()), (header::CONTENT_DISPOSITION, disposition)],
        output,
    )
        .into_response())
}

/// Handle one JSON-RPC request posted to /mcp.
async fn handle_mcp_post(
    State(state): State<Arc<HttpState>>,
    req: Result<Json<JsonRpcRequest>, JsonRejection>,
) -> Response {
    let req = match req {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let message = format!("Parse error: {}", rejection.body_text());
            return Json(JsonRpcResponse::error(None, PARSE_ERROR, message)).into_response();
        }
    };

    match handle_request(&req, &state.tools, &state.ctx).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::AnalysisConfig;
    use crate::models::Paper;
    use crate::tools::register_all_tools;

    fn state() -> HttpState {
        let store = RecordStore::new(vec![Paper::new(1, "Graph Theory", &["A", "B"], 2020, "X", 4)]);
        HttpState {
            tools: register_all_tools(),
            ctx: ToolContext::with_store(AnalysisConfig::new(), store),
        }
    }

    fn inline_request() -> ApiRequest {
        serde_json::from_value(json!({
            "papers": [{"id": 1, "title": "T", "authors": ["A"], "year": 2020, "venue": "V", "citations": 3}]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_inline_papers_are_not_cached() {
        let state = state();
        for _ in 0..20 {
            let report = analysis_for(&state, &inline_request()).await.unwrap();
            assert_eq!(report.basic.total_citations, 3);
        }

        state.ctx.cache.run_pending_tasks().await;
        assert_eq!(state.ctx.cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_session_analysis_is_cached_once() {
        let state = state();
        let first = analysis_for(&state, &ApiRequest::default()).await.unwrap();
        let second = analysis_for(&state, &ApiRequest::default()).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        state.ctx.cache.run_pending_tasks().await;
        assert_eq!(state.ctx.cache.entry_count(), 1);
    }

    #[tokio::test]
    async fn test_inline_papers_still_validate_criteria() {
        let mut request = inline_request();
        request.criteria = request.criteria.years(Some(2021), Some(2020));
        let err = analysis_for(&state(), &request).await.unwrap_err();
        assert!(err.0.is_client_error());
    }
}
