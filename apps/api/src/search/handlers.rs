//! Axum route handlers for the Search API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::locations::handlers::resolve_limit;
use crate::search::engine::{
    get_search_suggestions, search_jobs, search_jobs_with_filters, SearchFilters, SearchOptions,
    SearchResult,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub occupation: Option<String>,
    #[serde(default)]
    pub exact: bool,
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub results: Vec<SearchResult>,
}

/// GET /api/v1/search
///
/// Plain ranked search, or filtered search when any filter is supplied.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let options = SearchOptions {
        exact_match: params.exact,
        case_sensitive: params.case_sensitive,
        ..SearchOptions::default()
    };
    let filters = SearchFilters {
        city: params.city,
        state: params.state,
        job_type: params.job_type,
        experience_level: params.experience_level,
        occupation: params.occupation,
    };

    let jobs = state.jobs.list_active().await?;
    let results = if filters.is_empty() {
        search_jobs(&jobs, &params.q, &options)
    } else {
        search_jobs_with_filters(&jobs, &params.q, &filters, &options)
    };

    Ok(Json(SearchResponse {
        query: params.q,
        total: results.len(),
        results,
    }))
}

/// GET /api/v1/search/suggestions?q=&limit=
pub async fn handle_search_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Vec<String>>, AppError> {
    let limit = resolve_limit(params.limit, state.config.suggestion_limit)?;
    let jobs = state.jobs.list_active().await?;
    Ok(Json(get_search_suggestions(&jobs, &params.q, limit)))
}
