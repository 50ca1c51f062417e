use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One activity assigned to one user, carrying per-assignment progress.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct UserActivity {
    pub id: i64,
    pub activity_id: i64,
    pub user_id: i64,
    pub status: String,
    pub is_on_time: Option<bool>,
    pub started_worked_on: Option<DateTime<Utc>>,
    pub time_took_to_complete_secs: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserActivity {
    pub fn new(user_id: i64, activity_id: i64, status: ActivityStatus) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            activity_id,
            user_id,
            status: status.as_str().to_string(),
            is_on_time: None,
            started_worked_on: None,
            time_took_to_complete_secs: 0,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Mutable fields accepted by the user-activity patch operation. Absent
/// fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UserActivityPatch {
    pub status: Option<ActivityStatus>,
    pub is_on_time: Option<bool>,
    pub started_worked_on: Option<DateTime<Utc>>,
    pub time_took_to_complete_secs: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStatus {
    Pending,
    InProgress,
    Done,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "PENDING",
            ActivityStatus::InProgress => "IN_PROGRESS",
            ActivityStatus::Done => "DONE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(ActivityStatus::Pending),
            "IN_PROGRESS" => Some(ActivityStatus::InProgress),
            "DONE" => Some(ActivityStatus::Done),
            _ => None,
        }
    }
}
