//! Job store — read access to the active job snapshot, plus the one write
//! the discovery service performs: storing repaired location slugs.
//!
//! `AppState` holds an `Arc<dyn JobStore>` so handlers can be exercised
//! against an in-memory store in tests.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::job::Job;

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Active listings, featured first, then newest first.
    async fn list_active(&self) -> Result<Vec<Job>, AppError>;

    async fn get(&self, id: i32) -> Result<Option<Job>, AppError>;

    /// Overwrites the stored canonical location slugs of one job.
    async fn update_location(&self, id: i32, city: &str, state: &str) -> Result<(), AppError>;
}

const JOB_COLUMNS: &str = r#"
    id,
    COALESCE(job_title, '')        AS job_title,
    COALESCE(company_name, '')     AS company_name,
    COALESCE(practice_location, '') AS practice_location,
    COALESCE(location_display, '') AS location_display,
    COALESCE(city, '')             AS city,
    COALESCE(state, '')            AS state,
    COALESCE(job_categories, '{}') AS job_categories,
    COALESCE(job_details, '')      AS job_details,
    COALESCE(job_type, '')         AS job_type,
    COALESCE(experience_level, '') AS experience_level,
    COALESCE(work_setting, '')     AS work_setting,
    COALESCE(salary_range, '')     AS salary_range,
    COALESCE(is_featured, FALSE)   AS is_featured,
    created_at
"#;

/// Postgres-backed store over the `jobs` table.
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn list_active(&self) -> Result<Vec<Job>, AppError> {
        let sql = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE status = 'active' \
             ORDER BY is_featured DESC, created_at DESC"
        );
        let jobs = sqlx::query_as::<_, Job>(&sql).fetch_all(&self.pool).await?;
        Ok(jobs)
    }

    async fn get(&self, id: i32) -> Result<Option<Job>, AppError> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn update_location(&self, id: i32, city: &str, state: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE jobs SET city = $1, state = $2 WHERE id = $3")
            .bind(city)
            .bind(state)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Job {id} not found")));
        }
        info!(job_id = id, city, state, "stored repaired job location");
        Ok(())
    }
}

#[cfg(test)]
pub mod memory {
    use tokio::sync::RwLock;

    use super::*;

    /// In-memory store for handler tests. Every job counts as active.
    pub struct MemoryJobStore {
        jobs: RwLock<Vec<Job>>,
    }

    impl MemoryJobStore {
        pub fn new(jobs: Vec<Job>) -> Self {
            Self {
                jobs: RwLock::new(jobs),
            }
        }
    }

    #[async_trait]
    impl JobStore for MemoryJobStore {
        async fn list_active(&self) -> Result<Vec<Job>, AppError> {
            Ok(self.jobs.read().await.clone())
        }

        async fn get(&self, id: i32) -> Result<Option<Job>, AppError> {
            Ok(self.jobs.read().await.iter().find(|j| j.id == id).cloned())
        }

        async fn update_location(&self, id: i32, city: &str, state: &str) -> Result<(), AppError> {
            let mut jobs = self.jobs.write().await;
            let job = jobs
                .iter_mut()
                .find(|j| j.id == id)
                .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
            job.city = city.to_string();
            job.state = state.to_string();
            Ok(())
        }
    }
}
