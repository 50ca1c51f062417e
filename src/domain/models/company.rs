use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A company owning users and templates. Departments are free-form names,
/// persisted as JSON text in a single column.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub admin: String,
    pub departments: Vec<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(name: String, description: String, admin: String, departments: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name,
            description,
            admin,
            departments,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
