use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::{
    activity::Activity,
    company::Company,
    template::Template,
    user::{User, UserWithCounts},
    user_activity::UserActivity,
};

/// Uniform envelope: every 200 response carries its payload under `data`.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub admin: String,
    pub departments: Vec<String>,
}

impl From<Company> for CompanyDto {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            description: company.description,
            admin: company.admin,
            departments: company.departments,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub department: String,
    pub company_id: i64,
    pub manager_id: Option<i64>,
    pub total_activities: i64,
    pub completed_activities: i64,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            department: user.department,
            company_id: user.company_id,
            manager_id: user.manager_id,
            total_activities: 0,
            completed_activities: 0,
        }
    }
}

impl From<UserWithCounts> for UserDto {
    fn from(annotated: UserWithCounts) -> Self {
        let mut dto = UserDto::from(annotated.user);
        dto.total_activities = annotated.total_activities;
        dto.completed_activities = annotated.completed_activities;
        dto
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub id: i64,
    pub title: String,
    pub tag: Option<String>,
    pub description: String,
    pub week: i32,
    pub time_estimation_secs: i64,
    pub user_average_time_secs: i64,
    pub user_completed_count: i64,
}

impl From<Activity> for ActivityDto {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            title: activity.title,
            tag: activity.tag,
            description: activity.description,
            week: activity.week,
            time_estimation_secs: activity.time_estimation_secs,
            user_average_time_secs: activity.user_average_time_secs,
            user_completed_count: activity.user_completed_count,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivityDto {
    pub id: i64,
    pub activity_id: i64,
    pub user_id: i64,
    pub status: String,
    pub is_on_time: Option<bool>,
    pub started_worked_on: Option<DateTime<Utc>>,
    pub time_took_to_complete_secs: i64,
}

impl From<UserActivity> for UserActivityDto {
    fn from(ua: UserActivity) -> Self {
        Self {
            id: ua.id,
            activity_id: ua.activity_id,
            user_id: ua.user_id,
            status: ua.status,
            is_on_time: ua.is_on_time,
            started_worked_on: ua.started_worked_on,
            time_took_to_complete_secs: ua.time_took_to_complete_secs,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDto {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub company_id: i64,
    pub activity_ids: Vec<i64>,
}

impl TemplateDto {
    pub fn from_template(template: Template, activity_ids: Vec<i64>) -> Self {
        Self {
            id: template.id,
            name: template.name,
            department: template.department,
            company_id: template.company_id,
            activity_ids,
        }
    }
}
