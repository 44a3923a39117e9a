use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One active listing as read from the `jobs` table.
///
/// `city` and `state` hold the canonical slugs written when the listing was
/// posted (or last repaired); they are empty when the location never parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i32,
    pub job_title: String,
    pub company_name: String,
    pub practice_location: String,
    pub location_display: String,
    pub city: String,
    pub state: String,
    pub job_categories: Vec<String>,
    pub job_details: String,
    pub job_type: String,
    pub experience_level: String,
    pub work_setting: String,
    pub salary_range: String,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}
