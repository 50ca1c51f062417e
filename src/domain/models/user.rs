use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub department: String,
    pub company_id: i64,
    pub manager_id: Option<i64>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        email: String,
        first_name: Option<String>,
        last_name: Option<String>,
        role: UserRole,
        department: String,
        company_id: i64,
        manager_id: Option<i64>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email,
            first_name,
            last_name,
            role: role.as_str().to_string(),
            department,
            company_id,
            manager_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A user together with its activity counters, as returned by the
/// employee-listing and by-email lookups.
#[derive(Debug, Clone)]
pub struct UserWithCounts {
    pub user: User,
    pub total_activities: i64,
    pub completed_activities: i64,
}

/// Profile fields a user update is allowed to touch. Credentials travel to
/// the identity provider, never into the local store.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Manager,
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Manager => "MANAGER",
            UserRole::Employee => "EMPLOYEE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(UserRole::Admin),
            "MANAGER" => Some(UserRole::Manager),
            "EMPLOYEE" => Some(UserRole::Employee),
            _ => None,
        }
    }
}
