pub mod postgres_activity_repo;
pub mod postgres_company_repo;
pub mod postgres_template_repo;
pub mod postgres_user_activity_repo;
pub mod postgres_user_repo;
pub mod sqlite_activity_repo;
pub mod sqlite_company_repo;
pub mod sqlite_template_repo;
pub mod sqlite_user_activity_repo;
pub mod sqlite_user_repo;
