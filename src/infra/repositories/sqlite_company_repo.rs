use crate::domain::{models::company::Company, ports::CompanyRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

pub struct SqliteCompanyRepo {
    pool: SqlitePool,
}

impl SqliteCompanyRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Departments live in a single JSON text column.
#[derive(FromRow)]
struct CompanyRow {
    id: i64,
    name: String,
    description: String,
    admin: String,
    departments: String,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: row.id,
            name: row.name,
            description: row.description,
            admin: row.admin,
            departments: serde_json::from_str(&row.departments).unwrap_or_default(),
            is_deleted: row.is_deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CompanyRepository for SqliteCompanyRepo {
    async fn create(&self, company: &Company) -> Result<Company, AppError> {
        let departments = serde_json::to_string(&company.departments)
            .map_err(|e| AppError::InternalWithMsg(format!("Department serialization failed: {}", e)))?;

        let row = sqlx::query_as::<_, CompanyRow>(
            "INSERT INTO companies (name, description, admin, departments, is_deleted, created_at, updated_at) VALUES (?, ?, ?, ?, 0, ?, ?) RETURNING id, name, description, admin, departments, is_deleted, created_at, updated_at",
        )
            .bind(&company.name)
            .bind(&company.description)
            .bind(&company.admin)
            .bind(departments)
            .bind(company.created_at)
            .bind(company.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError> {
        let row = sqlx::query_as::<_, CompanyRow>(
            "SELECT id, name, description, admin, departments, is_deleted, created_at, updated_at FROM companies WHERE id = ? AND is_deleted = 0",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(row.map(Company::from))
    }

    async fn list(&self) -> Result<Vec<Company>, AppError> {
        let rows = sqlx::query_as::<_, CompanyRow>(
            "SELECT id, name, description, admin, departments, is_deleted, created_at, updated_at FROM companies WHERE is_deleted = 0 ORDER BY id ASC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(rows.into_iter().map(Company::from).collect())
    }

    async fn update(&self, company: &Company) -> Result<Company, AppError> {
        let departments = serde_json::to_string(&company.departments)
            .map_err(|e| AppError::InternalWithMsg(format!("Department serialization failed: {}", e)))?;

        let row = sqlx::query_as::<_, CompanyRow>(
            "UPDATE companies SET name = ?, description = ?, admin = ?, departments = ?, updated_at = ? WHERE id = ? AND is_deleted = 0 RETURNING id, name, description, admin, departments, is_deleted, created_at, updated_at",
        )
            .bind(&company.name)
            .bind(&company.description)
            .bind(&company.admin)
            .bind(departments)
            .bind(Utc::now())
            .bind(company.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE companies SET is_deleted = 1, updated_at = ? WHERE id = ? AND is_deleted = 0")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }
}
