use crate::domain::models::{
    activity::Activity, company::Company, template::Template, user::User,
    user_activity::UserActivity,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create(&self, company: &Company) -> Result<Company, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError>;
    async fn list(&self) -> Result<Vec<Company>, AppError>;
    async fn update(&self, company: &Company) -> Result<Company, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;
    async fn list_employees_of(&self, manager_id: i64) -> Result<Vec<User>, AppError>;
    /// Persists the update allow-list: email, first name, last name and the
    /// update timestamp. Everything else is left untouched.
    async fn update_profile(
        &self,
        id: i64,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<User, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn create(&self, activity: &Activity) -> Result<Activity, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Activity>, AppError>;
    async fn list(&self) -> Result<Vec<Activity>, AppError>;
    async fn update(&self, activity: &Activity) -> Result<Activity, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// Folds one completion time into the rolling average and bumps the
    /// completed counter in a single statement.
    async fn record_completion(&self, id: i64, time_secs: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserActivityRepository: Send + Sync {
    async fn create(&self, user_activity: &UserActivity) -> Result<UserActivity, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<UserActivity>, AppError>;
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<UserActivity>, AppError>;
    async fn update(&self, user_activity: &UserActivity) -> Result<UserActivity, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    async fn count_for_user(&self, user_id: i64) -> Result<i64, AppError>;
    async fn count_completed_for_user(&self, user_id: i64) -> Result<i64, AppError>;
    /// Creates one pending assignment per activity id inside a single
    /// transaction. Either every row is inserted or none.
    async fn create_for_activities(
        &self,
        user_id: i64,
        activity_ids: &[i64],
    ) -> Result<Vec<UserActivity>, AppError>;
}

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn create(&self, template: &Template, activity_ids: &[i64])
        -> Result<Template, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Template>, AppError>;
    async fn list(&self, company_id: Option<i64>) -> Result<Vec<Template>, AppError>;
    /// Updates name and, when given, replaces the activity set. The id,
    /// company and department of the stored row are preserved.
    async fn update(
        &self,
        template: &Template,
        activity_ids: Option<&[i64]>,
    ) -> Result<Template, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// Non-deleted activity ids referenced by the template.
    async fn activity_ids(&self, template_id: i64) -> Result<Vec<i64>, AppError>;
}

/// External service of record for account credentials. Sign-up happens with
/// email and password; updates act on the account identified by the caller's
/// bearer token, passed down explicitly.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AppError>;
    async fn update_email(&self, id_token: &str, new_email: &str) -> Result<(), AppError>;
    async fn update_password(&self, id_token: &str, new_password: &str) -> Result<(), AppError>;
}
