//! HTTP surface of the dashboard.

use crate::view::{Stats, filter_jobs, render_dashboard};
use axum::{
    Json, Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything the dashboard needs at runtime; built once in `main`.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub store_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

/// Query parameters for the main page
#[derive(Debug, Deserialize)]
struct SearchParams {
    search: Option<String>,
}

pub fn router(config: DashboardConfig) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/api/jobs", get(api_jobs_handler))
        .with_state(Arc::new(config))
}

/// Handler for GET /?search=<term>
async fn dashboard_handler(
    State(config): State<Arc<DashboardConfig>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let search_term = params.search.unwrap_or_default();

    let jobs = filter_jobs(common::load_jobs(&config.store_path), &search_term);
    let stats = Stats::from_jobs(&jobs);
    tracing::debug!(search = %search_term, ?stats, "rendering dashboard");

    Html(render_dashboard(&jobs, &stats, &search_term))
}

/// Handler for GET /api/jobs; records are returned exactly as stored.
async fn api_jobs_handler(State(config): State<Arc<DashboardConfig>>) -> Json<Vec<Value>> {
    let records = common::load_records(&config.store_path);
    tracing::debug!("serving {} jobs", records.len());
    Json(records)
}
