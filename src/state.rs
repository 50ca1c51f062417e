use std::sync::Arc;
use crate::domain::ports::{
    ActivityRepository, CompanyRepository, IdentityProvider, TemplateRepository,
    UserActivityRepository, UserRepository,
};
use crate::domain::services::{
    user_activity_service::UserActivityService, user_service::UserService,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub company_repo: Arc<dyn CompanyRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub activity_repo: Arc<dyn ActivityRepository>,
    pub user_activity_repo: Arc<dyn UserActivityRepository>,
    pub template_repo: Arc<dyn TemplateRepository>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub user_service: Arc<UserService>,
    pub user_activity_service: Arc<UserActivityService>,
}
