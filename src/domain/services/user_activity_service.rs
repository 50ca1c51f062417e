use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{
    models::user_activity::{ActivityStatus, UserActivity, UserActivityPatch},
    ports::{ActivityRepository, TemplateRepository, UserActivityRepository, UserRepository},
};
use crate::error::AppError;

/// Thin orchestration over user-activity rows: CRUD plus template fan-out.
/// Completing an assignment derives timing state and feeds the activity's
/// rolling aggregates.
pub struct UserActivityService {
    user_activities: Arc<dyn UserActivityRepository>,
    activities: Arc<dyn ActivityRepository>,
    templates: Arc<dyn TemplateRepository>,
    users: Arc<dyn UserRepository>,
}

impl UserActivityService {
    pub fn new(
        user_activities: Arc<dyn UserActivityRepository>,
        activities: Arc<dyn ActivityRepository>,
        templates: Arc<dyn TemplateRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            user_activities,
            activities,
            templates,
            users,
        }
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<UserActivity>, AppError> {
        self.user_activities.list_for_user(user_id).await
    }

    pub async fn get(&self, id: i64) -> Result<UserActivity, AppError> {
        self.user_activities
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User activity {} not found", id)))
    }

    pub async fn create(
        &self,
        user_id: i64,
        activity_id: i64,
        status: Option<ActivityStatus>,
    ) -> Result<UserActivity, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
        self.activities
            .find_by_id(activity_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))?;

        let assignment = UserActivity::new(
            user_id,
            activity_id,
            status.unwrap_or(ActivityStatus::Pending),
        );
        self.user_activities.create(&assignment).await
    }

    /// Merges the patch onto the stored row. A transition to IN_PROGRESS
    /// stamps the start time when absent; a transition to DONE fills in the
    /// completion time, the on-time flag and the activity aggregates unless
    /// the client supplied those values itself.
    pub async fn patch(&self, id: i64, patch: UserActivityPatch) -> Result<UserActivity, AppError> {
        let mut ua = self
            .user_activities
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User activity {} not found", id)))?;

        let now = Utc::now();
        let previous_status = ActivityStatus::parse(&ua.status);

        if let Some(flag) = patch.is_on_time {
            ua.is_on_time = Some(flag);
        }
        if let Some(started) = patch.started_worked_on {
            ua.started_worked_on = Some(started);
        }
        if let Some(secs) = patch.time_took_to_complete_secs {
            ua.time_took_to_complete_secs = secs;
        }

        if let Some(status) = patch.status {
            if status == ActivityStatus::InProgress && ua.started_worked_on.is_none() {
                ua.started_worked_on = Some(now);
            }

            if status == ActivityStatus::Done && previous_status != Some(ActivityStatus::Done) {
                if patch.time_took_to_complete_secs.is_none() {
                    if let Some(started) = ua.started_worked_on {
                        ua.time_took_to_complete_secs = (now - started).num_seconds().max(0);
                    }
                }

                if let Some(activity) = self.activities.find_by_id(ua.activity_id).await? {
                    if patch.is_on_time.is_none() && activity.time_estimation_secs > 0 {
                        ua.is_on_time =
                            Some(ua.time_took_to_complete_secs <= activity.time_estimation_secs);
                    }
                    self.activities
                        .record_completion(activity.id, ua.time_took_to_complete_secs)
                        .await?;
                }
            }

            ua.status = status.as_str().to_string();
        }

        ua.updated_at = now;
        self.user_activities.update(&ua).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.user_activities
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User activity {} not found", id)))?;

        self.user_activities.delete(id).await
    }

    /// Fans out one pending assignment per activity the template references.
    /// The inserts run in one transaction: all rows are created or none.
    pub async fn assign_template(
        &self,
        user_id: i64,
        template_id: i64,
    ) -> Result<Vec<UserActivity>, AppError> {
        self.templates
            .find_by_id(template_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Template {} not found", template_id)))?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let activity_ids = self.templates.activity_ids(template_id).await?;
        if activity_ids.is_empty() {
            return Ok(Vec::new());
        }

        let created = self
            .user_activities
            .create_for_activities(user_id, &activity_ids)
            .await?;

        info!(
            "Assigned template {} to user {} ({} activities)",
            template_id,
            user_id,
            created.len()
        );

        Ok(created)
    }
}
