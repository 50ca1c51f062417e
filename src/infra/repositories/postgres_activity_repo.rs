use crate::domain::{models::activity::Activity, ports::ActivityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

const ACTIVITY_COLUMNS: &str = "id, title, tag, description, week, time_estimation_secs, user_average_time_secs, user_completed_count, is_deleted, created_at, updated_at";

pub struct PostgresActivityRepo {
    pool: PgPool,
}

impl PostgresActivityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepo {
    async fn create(&self, activity: &Activity) -> Result<Activity, AppError> {
        sqlx::query_as::<_, Activity>(&format!(
            "INSERT INTO activities (title, tag, description, week, time_estimation_secs, user_average_time_secs, user_completed_count, is_deleted, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8, $9) RETURNING {ACTIVITY_COLUMNS}",
        ))
            .bind(&activity.title)
            .bind(&activity.tag)
            .bind(&activity.description)
            .bind(activity.week)
            .bind(activity.time_estimation_secs)
            .bind(activity.user_average_time_secs)
            .bind(activity.user_completed_count)
            .bind(activity.created_at)
            .bind(activity.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Activity>, AppError> {
        sqlx::query_as::<_, Activity>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1 AND is_deleted = FALSE",
        ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Activity>, AppError> {
        sqlx::query_as::<_, Activity>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE is_deleted = FALSE ORDER BY week ASC, id ASC",
        ))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, activity: &Activity) -> Result<Activity, AppError> {
        sqlx::query_as::<_, Activity>(&format!(
            "UPDATE activities SET title = $1, tag = $2, description = $3, week = $4, time_estimation_secs = $5, updated_at = $6 WHERE id = $7 AND is_deleted = FALSE RETURNING {ACTIVITY_COLUMNS}",
        ))
            .bind(&activity.title)
            .bind(&activity.tag)
            .bind(&activity.description)
            .bind(activity.week)
            .bind(activity.time_estimation_secs)
            .bind(Utc::now())
            .bind(activity.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE activities SET is_deleted = TRUE, updated_at = $1 WHERE id = $2 AND is_deleted = FALSE")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }

    async fn record_completion(&self, id: i64, time_secs: i64) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE activities SET user_average_time_secs = (user_average_time_secs * user_completed_count + $1) / (user_completed_count + 1), user_completed_count = user_completed_count + 1, updated_at = $2 WHERE id = $3 AND is_deleted = FALSE",
        )
            .bind(time_secs)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }
}
