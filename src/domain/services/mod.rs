pub mod user_activity_service;
pub mod user_service;
