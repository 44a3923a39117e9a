//! Axum route handlers for landing pages and the homepage feed.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::locations::gazetteer::{JobCategory, JOB_CATEGORIES};
use crate::locations::slugify;
use crate::models::job::Job;
use crate::sorting::catalog::{CategoryPage, LocationPage};
use crate::sorting::sorter::{
    jobs_for_category, jobs_for_homepage, jobs_for_location_page, sort_job, JobSortingResult,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LocationPageResponse {
    pub page: LocationPage,
    pub total: usize,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
pub struct CategoryPageResponse {
    pub page: CategoryPage,
    pub total: usize,
    pub jobs: Vec<Job>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/locations/pages/:state
pub async fn handle_state_page(
    State(state): State<AppState>,
    Path(state_slug): Path<String>,
) -> Result<Json<LocationPageResponse>, AppError> {
    location_page(&state, &[state_slug]).await
}

/// GET /api/v1/locations/pages/:state/:second
///
/// `second` is either a city or a category; the catalog knows which.
pub async fn handle_second_level_page(
    State(state): State<AppState>,
    Path((state_slug, second)): Path<(String, String)>,
) -> Result<Json<LocationPageResponse>, AppError> {
    location_page(&state, &[state_slug, second]).await
}

/// GET /api/v1/locations/pages/:state/:city/:category
pub async fn handle_city_category_page(
    State(state): State<AppState>,
    Path((state_slug, city, category)): Path<(String, String, String)>,
) -> Result<Json<LocationPageResponse>, AppError> {
    location_page(&state, &[state_slug, city, category]).await
}

/// GET /api/v1/occupations
pub async fn handle_list_occupations() -> Json<&'static [JobCategory]> {
    Json(JOB_CATEGORIES)
}

/// GET /api/v1/occupations/:category
pub async fn handle_occupation_page(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CategoryPageResponse>, AppError> {
    let slug = slugify(&category);
    let page = state
        .catalog
        .category_page(&slug)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Occupation '{category}' not found")))?;

    let all_jobs = state.jobs.list_active().await?;
    let jobs: Vec<Job> = jobs_for_category(&all_jobs, &slug)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(CategoryPageResponse {
        page,
        total: jobs.len(),
        jobs,
    }))
}

/// GET /api/v1/jobs/homepage
///
/// Featured listings plus listings no landing page absorbs.
pub async fn handle_homepage(State(state): State<AppState>) -> Result<Json<Vec<Job>>, AppError> {
    let all_jobs = state.jobs.list_active().await?;
    let jobs = jobs_for_homepage(&state.catalog, &all_jobs)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(jobs))
}

/// GET /api/v1/jobs/:id/pages
pub async fn handle_job_pages(
    State(state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<Json<JobSortingResult>, AppError> {
    let job = state
        .jobs
        .get(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    Ok(Json(sort_job(&state.catalog, &job)))
}

async fn location_page(
    state: &AppState,
    segments: &[String],
) -> Result<Json<LocationPageResponse>, AppError> {
    let path: Vec<String> = segments.iter().map(|s| slugify(s)).collect();
    let url = format!("/locations/{}", path.join("/"));
    let page = state
        .catalog
        .find_by_url(&url)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Page {url} not found")))?;

    let all_jobs = state.jobs.list_active().await?;
    let jobs: Vec<Job> = jobs_for_location_page(
        &all_jobs,
        &page.state,
        page.city.as_deref(),
        page.category.as_deref(),
    )
    .into_iter()
    .cloned()
    .collect();

    Ok(Json(LocationPageResponse {
        page,
        total: jobs.len(),
        jobs,
    }))
}
