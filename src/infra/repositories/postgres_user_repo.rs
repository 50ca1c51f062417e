use crate::domain::{models::user::User, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, email, first_name, last_name, role, department, company_id, manager_id, is_deleted, created_at, updated_at";

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, first_name, last_name, role, department, company_id, manager_id, is_deleted, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8, $9) RETURNING {USER_COLUMNS}",
        ))
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.role)
            .bind(&user.department)
            .bind(user.company_id)
            .bind(user.manager_id)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND is_deleted = FALSE",
        ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND is_deleted = FALSE",
        ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE email = $1 AND is_deleted = FALSE",
        )
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(count > 0)
    }

    async fn list_employees_of(&self, manager_id: i64) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE manager_id = $1 AND is_deleted = FALSE ORDER BY id ASC",
        ))
            .bind(manager_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_profile(
        &self,
        id: i64,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET email = $1, first_name = $2, last_name = $3, updated_at = $4 WHERE id = $5 AND is_deleted = FALSE RETURNING {USER_COLUMNS}",
        ))
            .bind(email)
            .bind(first_name)
            .bind(last_name)
            .bind(updated_at)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET is_deleted = TRUE, updated_at = $1 WHERE id = $2 AND is_deleted = FALSE")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }
}
