use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::locations::gazetteer::LocationData;
use crate::locations::matcher::{get_location_suggestions, parse_location, LocationMatch};
use crate::sorting::catalog::{CategoryPage, LocationPage};
use crate::state::AppState;

/// Upper bound on any caller-supplied suggestion `limit`.
pub const MAX_SUGGESTION_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct ParseQuery {
    pub q: String,
}

#[derive(Deserialize)]
pub struct SuggestionQuery {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct PageListResponse<'a> {
    pub location_pages: &'a [LocationPage],
    pub category_pages: &'a [CategoryPage],
}

/// Resolves a caller-supplied limit against the configured default.
pub fn resolve_limit(requested: Option<usize>, default: usize) -> Result<usize, AppError> {
    match requested {
        Some(0) => Err(AppError::Validation("limit must be at least 1".to_string())),
        Some(limit) => Ok(limit.min(MAX_SUGGESTION_LIMIT)),
        None => Ok(default),
    }
}

/// GET /api/v1/locations/parse?q=
pub async fn handle_parse_location(Query(params): Query<ParseQuery>) -> Json<LocationMatch> {
    Json(parse_location(&params.q))
}

/// GET /api/v1/locations/suggestions?q=&limit=
pub async fn handle_location_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionQuery>,
) -> Result<Json<Vec<LocationData>>, AppError> {
    let limit = resolve_limit(params.limit, state.config.suggestion_limit)?;
    Ok(Json(get_location_suggestions(&params.q, limit)))
}

/// GET /api/v1/locations/pages
///
/// The full landing-page catalog; the frontend builds its sitemap from it.
pub async fn handle_list_pages(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let body = PageListResponse {
        location_pages: state.catalog.pages(),
        category_pages: state.catalog.category_pages(),
    };
    let value = serde_json::to_value(body).map_err(|e| AppError::Internal(e.into()))?;
    Ok(Json(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_limit() {
        assert_eq!(resolve_limit(None, 10).unwrap(), 10);
        assert_eq!(resolve_limit(Some(3), 10).unwrap(), 3);
        assert_eq!(resolve_limit(Some(500), 10).unwrap(), MAX_SUGGESTION_LIMIT);
        assert!(resolve_limit(Some(0), 10).is_err());
    }
}
