use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{
    models::user::{User, UserUpdate, UserWithCounts},
    ports::{IdentityProvider, UserActivityRepository, UserRepository},
};
use crate::error::AppError;

/// Orchestrates user lookups and writes. Account credentials live at the
/// external identity provider; the local row only carries profile data, so
/// create and update talk to the provider before touching the store.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    user_activities: Arc<dyn UserActivityRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        user_activities: Arc<dyn UserActivityRepository>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            users,
            user_activities,
            identity,
        }
    }

    pub async fn list_employees(&self, manager_id: i64) -> Result<Vec<UserWithCounts>, AppError> {
        let employees = self.users.list_employees_of(manager_id).await?;

        let mut annotated = Vec::with_capacity(employees.len());
        for user in employees {
            let total = self.user_activities.count_for_user(user.id).await?;
            let completed = self.user_activities.count_completed_for_user(user.id).await?;
            annotated.push(UserWithCounts {
                user,
                total_activities: total,
                completed_activities: completed,
            });
        }

        Ok(annotated)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<UserWithCounts, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", email)))?;

        let total = self.user_activities.count_for_user(user.id).await?;
        let completed = self.user_activities.count_completed_for_user(user.id).await?;

        Ok(UserWithCounts {
            user,
            total_activities: total,
            completed_activities: completed,
        })
    }

    /// Registers the account at the identity provider, then persists the
    /// local row. Provider failure aborts before anything is written.
    pub async fn create(&self, user: User, password: &str) -> Result<User, AppError> {
        if user.email.trim().is_empty() {
            return Err(AppError::Validation("Email must not be empty".into()));
        }
        if password.is_empty() {
            return Err(AppError::Validation("Password must not be empty".into()));
        }

        if self.users.email_exists(&user.email).await? {
            return Err(AppError::Conflict(format!(
                "User with email {} already exists",
                user.email
            )));
        }

        self.identity.sign_up(&user.email, password).await?;

        let created = self.users.create(&user).await?;
        info!("Created user {} ({})", created.id, created.email);

        Ok(created)
    }

    /// Applies the update allow-list. Password and email changes go through
    /// the identity provider first, using the caller's bearer token; both
    /// must succeed before any local field is written.
    pub async fn update(
        &self,
        id: i64,
        update: UserUpdate,
        id_token: Option<&str>,
    ) -> Result<User, AppError> {
        let existing = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        let wants_password = update
            .new_password
            .as_deref()
            .is_some_and(|p| !p.is_empty());
        let wants_email = update.email != existing.email;

        if wants_password || wants_email {
            let token = id_token.ok_or(AppError::Unauthorized)?;

            if wants_password {
                self.identity
                    .update_password(token, update.new_password.as_deref().unwrap_or_default())
                    .await?;
            }
            if wants_email {
                self.identity.update_email(token, &update.email).await?;
            }
        }

        self.users
            .update_profile(
                id,
                &update.email,
                update.first_name.as_deref(),
                update.last_name.as_deref(),
                Utc::now(),
            )
            .await
    }

    /// Flags the user as deleted. Assignments are left in place.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        self.users.delete(id).await?;
        info!("Soft-deleted user {}", id);

        Ok(())
    }
}
