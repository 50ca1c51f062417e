use crate::domain::{
    models::user_activity::{ActivityStatus, UserActivity},
    ports::UserActivityRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

const USER_ACTIVITY_COLUMNS: &str = "id, activity_id, user_id, status, is_on_time, started_worked_on, time_took_to_complete_secs, is_deleted, created_at, updated_at";

pub struct PostgresUserActivityRepo {
    pool: PgPool,
}

impl PostgresUserActivityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserActivityRepository for PostgresUserActivityRepo {
    async fn create(&self, user_activity: &UserActivity) -> Result<UserActivity, AppError> {
        sqlx::query_as::<_, UserActivity>(&format!(
            "INSERT INTO user_activities (activity_id, user_id, status, is_on_time, started_worked_on, time_took_to_complete_secs, is_deleted, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8) RETURNING {USER_ACTIVITY_COLUMNS}",
        ))
            .bind(user_activity.activity_id)
            .bind(user_activity.user_id)
            .bind(&user_activity.status)
            .bind(user_activity.is_on_time)
            .bind(user_activity.started_worked_on)
            .bind(user_activity.time_took_to_complete_secs)
            .bind(user_activity.created_at)
            .bind(user_activity.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserActivity>, AppError> {
        sqlx::query_as::<_, UserActivity>(&format!(
            "SELECT {USER_ACTIVITY_COLUMNS} FROM user_activities WHERE id = $1 AND is_deleted = FALSE",
        ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<UserActivity>, AppError> {
        sqlx::query_as::<_, UserActivity>(&format!(
            "SELECT {USER_ACTIVITY_COLUMNS} FROM user_activities WHERE user_id = $1 AND is_deleted = FALSE ORDER BY id ASC",
        ))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, user_activity: &UserActivity) -> Result<UserActivity, AppError> {
        sqlx::query_as::<_, UserActivity>(&format!(
            "UPDATE user_activities SET status = $1, is_on_time = $2, started_worked_on = $3, time_took_to_complete_secs = $4, updated_at = $5 WHERE id = $6 AND is_deleted = FALSE RETURNING {USER_ACTIVITY_COLUMNS}",
        ))
            .bind(&user_activity.status)
            .bind(user_activity.is_on_time)
            .bind(user_activity.started_worked_on)
            .bind(user_activity.time_took_to_complete_secs)
            .bind(user_activity.updated_at)
            .bind(user_activity.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE user_activities SET is_deleted = TRUE, updated_at = $1 WHERE id = $2 AND is_deleted = FALSE")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }

    async fn count_for_user(&self, user_id: i64) -> Result<i64, AppError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_activities WHERE user_id = $1 AND is_deleted = FALSE",
        )
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_completed_for_user(&self, user_id: i64) -> Result<i64, AppError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_activities WHERE user_id = $1 AND status = $2 AND is_deleted = FALSE",
        )
            .bind(user_id)
            .bind(ActivityStatus::Done.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create_for_activities(
        &self,
        user_id: i64,
        activity_ids: &[i64],
    ) -> Result<Vec<UserActivity>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let mut created = Vec::with_capacity(activity_ids.len());

        for activity_id in activity_ids {
            let assignment = UserActivity::new(user_id, *activity_id, ActivityStatus::Pending);
            let row = sqlx::query_as::<_, UserActivity>(&format!(
                "INSERT INTO user_activities (activity_id, user_id, status, is_on_time, started_worked_on, time_took_to_complete_secs, is_deleted, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8) RETURNING {USER_ACTIVITY_COLUMNS}",
            ))
                .bind(assignment.activity_id)
                .bind(assignment.user_id)
                .bind(&assignment.status)
                .bind(assignment.is_on_time)
                .bind(assignment.started_worked_on)
                .bind(assignment.time_took_to_complete_secs)
                .bind(assignment.created_at)
                .bind(assignment.updated_at)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            created.push(row);
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(created)
    }
}
