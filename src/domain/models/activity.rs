use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An onboarding activity. `user_average_time_secs` and
/// `user_completed_count` are rolling aggregates maintained whenever an
/// assignment of this activity is completed.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub tag: Option<String>,
    pub description: String,
    pub week: i32,
    pub time_estimation_secs: i64,
    pub user_average_time_secs: i64,
    pub user_completed_count: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        title: String,
        tag: Option<String>,
        description: String,
        week: i32,
        time_estimation_secs: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title,
            tag,
            description,
            week,
            time_estimation_secs,
            user_average_time_secs: 0,
            user_completed_count: 0,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
