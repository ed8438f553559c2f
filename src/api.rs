use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;

use crate::analyzer::DexAnalyzer;
use crate::types::AnalysisRecord;

/// Read-only HTTP surface for the presentation layer. Every handler returns
/// best-effort data from the store; nothing here can fail with an exception.
pub fn analysis_routes() -> Router<Arc<DexAnalyzer>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/analysis", get(get_all))
        .route("/analysis/top", get(get_top))
        .route("/analysis/recommended", get(get_recommended))
        .route("/analysis/venues/:name", get(get_venue))
}

async fn health_check() -> &'static str {
    info!("Health check requested");
    "OK"
}

async fn get_all(State(analyzer): State<Arc<DexAnalyzer>>) -> Json<Vec<AnalysisRecord>> {
    Json(analyzer.all())
}

#[derive(Debug, Deserialize)]
struct TopParams {
    n: Option<usize>,
}

async fn get_top(
    State(analyzer): State<Arc<DexAnalyzer>>,
    Query(params): Query<TopParams>,
) -> Json<Vec<AnalysisRecord>> {
    Json(analyzer.top_n(params.n.unwrap_or(3)))
}

/// Empty store is a renderable "analyzing" state, not an error.
async fn get_recommended(State(analyzer): State<Arc<DexAnalyzer>>) -> Response {
    match analyzer.recommended() {
        Some(record) => Json(record).into_response(),
        None => Json(serde_json::json!({ "status": "analyzing" })).into_response(),
    }
}

async fn get_venue(
    State(analyzer): State<Arc<DexAnalyzer>>,
    Path(name): Path<String>,
) -> Response {
    match analyzer.by_name(&name) {
        Some(record) => Json(record).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("unknown venue: {}", name) })),
        )
            .into_response(),
    }
}
