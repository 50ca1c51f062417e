use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::requests::{
    AssignTemplateQuery, CreateUserActivityRequest, UpdateUserActivityRequest,
};
use crate::api::dtos::responses::{ApiResponse, UserActivityDto};
use crate::domain::models::user_activity::{ActivityStatus, UserActivityPatch};
use crate::error::AppError;
use crate::state::AppState;

fn parse_status(status: &str) -> Result<ActivityStatus, AppError> {
    ActivityStatus::parse(status)
        .ok_or_else(|| AppError::Validation(format!("Unknown status: {}", status)))
}

pub async fn list_user_activities(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assignments = state.user_activity_service.list_for_user(user_id).await?;
    let dtos: Vec<UserActivityDto> = assignments.into_iter().map(UserActivityDto::from).collect();

    Ok(Json(ApiResponse::new(dtos)))
}

pub async fn get_user_activity(
    State(state): State<Arc<AppState>>,
    Path((_, user_activity_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let assignment = state.user_activity_service.get(user_activity_id).await?;

    Ok(Json(ApiResponse::new(UserActivityDto::from(assignment))))
}

pub async fn create_user_activity(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(payload): Json<CreateUserActivityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = payload.status.as_deref().map(parse_status).transpose()?;

    let created = state
        .user_activity_service
        .create(user_id, payload.activity_id, status)
        .await?;

    Ok(Json(ApiResponse::new(UserActivityDto::from(created))))
}

pub async fn update_user_activity(
    State(state): State<Arc<AppState>>,
    Path((_, user_activity_id)): Path<(i64, i64)>,
    Json(payload): Json<UpdateUserActivityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let patch = UserActivityPatch {
        status: payload.status.as_deref().map(parse_status).transpose()?,
        is_on_time: payload.is_on_time,
        started_worked_on: payload.started_worked_on,
        time_took_to_complete_secs: payload.time_took_to_complete_secs,
    };

    let updated = state
        .user_activity_service
        .patch(user_activity_id, patch)
        .await?;

    Ok(Json(ApiResponse::new(UserActivityDto::from(updated))))
}

pub async fn delete_user_activity(
    State(state): State<Arc<AppState>>,
    Path((_, user_activity_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    state.user_activity_service.delete(user_activity_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// The route mirrors the upstream API: fixed `/assign/{template_id}` path
/// with the target user in the `userId` query parameter.
pub async fn assign_template(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<i64>,
    Query(query): Query<AssignTemplateQuery>,
) -> Result<impl IntoResponse, AppError> {
    state
        .user_activity_service
        .assign_template(query.user_id, template_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
