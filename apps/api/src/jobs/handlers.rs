use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::jobs::repair::{repair_location, LocationRepair};
use crate::models::job::Job;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RepairParams {
    /// Report the repair without writing it.
    #[serde(default)]
    pub dry_run: bool,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(state.jobs.list_active().await?))
}

/// POST /api/v1/jobs/:id/repair-location
///
/// Re-parses the job's practice location and stores the canonical slugs
/// when they differ from the stored ones.
pub async fn handle_repair_location(
    State(state): State<AppState>,
    Path(job_id): Path<i32>,
    Query(params): Query<RepairParams>,
) -> Result<Json<LocationRepair>, AppError> {
    let job = state
        .jobs
        .get(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let repair = repair_location(&job);
    if repair.changed && !params.dry_run {
        state
            .jobs
            .update_location(job.id, &repair.city, &repair.state)
            .await?;
    }

    info!(
        job_id,
        changed = repair.changed,
        dry_run = params.dry_run,
        "location repair evaluated"
    );
    Ok(Json(repair))
}
