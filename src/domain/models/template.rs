use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named bundle of activities that can be assigned to a user in one go.
/// The activity set lives in the template_activities join table.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub company_id: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Template {
    pub fn new(name: String, department: String, company_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name,
            department,
            company_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
