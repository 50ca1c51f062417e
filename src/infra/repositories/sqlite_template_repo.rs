use crate::domain::{models::template::Template, ports::TemplateRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const TEMPLATE_COLUMNS: &str = "id, name, department, company_id, is_deleted, created_at, updated_at";

pub struct SqliteTemplateRepo {
    pool: SqlitePool,
}

impl SqliteTemplateRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for SqliteTemplateRepo {
    async fn create(
        &self,
        template: &Template,
        activity_ids: &[i64],
    ) -> Result<Template, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let row = sqlx::query_as::<_, Template>(&format!(
            "INSERT INTO templates (name, department, company_id, is_deleted, created_at, updated_at) VALUES (?, ?, ?, 0, ?, ?) RETURNING {TEMPLATE_COLUMNS}",
        ))
            .bind(&template.name)
            .bind(&template.department)
            .bind(template.company_id)
            .bind(template.created_at)
            .bind(template.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        for activity_id in activity_ids {
            sqlx::query("INSERT INTO template_activities (template_id, activity_id) VALUES (?, ?)")
                .bind(row.id)
                .bind(activity_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Template>, AppError> {
        sqlx::query_as::<_, Template>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = ? AND is_deleted = 0",
        ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, company_id: Option<i64>) -> Result<Vec<Template>, AppError> {
        let templates = match company_id {
            Some(company_id) => {
                sqlx::query_as::<_, Template>(&format!(
                    "SELECT {TEMPLATE_COLUMNS} FROM templates WHERE company_id = ? AND is_deleted = 0 ORDER BY id ASC",
                ))
                    .bind(company_id)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query_as::<_, Template>(&format!(
                    "SELECT {TEMPLATE_COLUMNS} FROM templates WHERE is_deleted = 0 ORDER BY id ASC",
                ))
                    .fetch_all(&self.pool)
                    .await
            }
        };

        templates.map_err(AppError::Database)
    }

    async fn update(
        &self,
        template: &Template,
        activity_ids: Option<&[i64]>,
    ) -> Result<Template, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let row = sqlx::query_as::<_, Template>(&format!(
            "UPDATE templates SET name = ?, updated_at = ? WHERE id = ? AND is_deleted = 0 RETURNING {TEMPLATE_COLUMNS}",
        ))
            .bind(&template.name)
            .bind(Utc::now())
            .bind(template.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if let Some(activity_ids) = activity_ids {
            sqlx::query("DELETE FROM template_activities WHERE template_id = ?")
                .bind(row.id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            for activity_id in activity_ids {
                sqlx::query("INSERT INTO template_activities (template_id, activity_id) VALUES (?, ?)")
                    .bind(row.id)
                    .bind(activity_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(AppError::Database)?;
            }
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE templates SET is_deleted = 1, updated_at = ? WHERE id = ? AND is_deleted = 0")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }

    async fn activity_ids(&self, template_id: i64) -> Result<Vec<i64>, AppError> {
        sqlx::query_scalar(
            "SELECT ta.activity_id FROM template_activities ta JOIN activities a ON a.id = ta.activity_id WHERE ta.template_id = ? AND a.is_deleted = 0 ORDER BY ta.activity_id ASC",
        )
            .bind(template_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
