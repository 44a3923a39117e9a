pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::locations::handlers as locations;
use crate::search::handlers as search;
use crate::sorting::handlers as pages;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Locations
        .route(
            "/api/v1/locations/parse",
            get(locations::handle_parse_location),
        )
        .route(
            "/api/v1/locations/suggestions",
            get(locations::handle_location_suggestions),
        )
        .route("/api/v1/locations/pages", get(locations::handle_list_pages))
        // Landing pages
        .route(
            "/api/v1/locations/pages/:state",
            get(pages::handle_state_page),
        )
        .route(
            "/api/v1/locations/pages/:state/:second",
            get(pages::handle_second_level_page),
        )
        .route(
            "/api/v1/locations/pages/:state/:city/:category",
            get(pages::handle_city_category_page),
        )
        .route("/api/v1/occupations", get(pages::handle_list_occupations))
        .route(
            "/api/v1/occupations/:category",
            get(pages::handle_occupation_page),
        )
        // Jobs
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/homepage", get(pages::handle_homepage))
        .route("/api/v1/jobs/:id/pages", get(pages::handle_job_pages))
        .route(
            "/api/v1/jobs/:id/repair-location",
            post(jobs::handle_repair_location),
        )
        // Search
        .route("/api/v1/search", get(search::handle_search))
        .route(
            "/api/v1/search/suggestions",
            get(search::handle_search_suggestions),
        )
        .with_state(state)
}
