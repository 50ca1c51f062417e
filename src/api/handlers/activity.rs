use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::requests::{CreateActivityRequest, UpdateActivityRequest};
use crate::api::dtos::responses::{ActivityDto, ApiResponse};
use crate::domain::models::activity::Activity;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateActivityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Activity title must not be empty".into()));
    }

    let activity = Activity::new(
        payload.title,
        payload.tag,
        payload.description.unwrap_or_default(),
        payload.week.unwrap_or(0),
        payload.time_estimation_secs.unwrap_or(0),
    );
    let created = state.activity_repo.create(&activity).await?;

    Ok(Json(ApiResponse::new(ActivityDto::from(created))))
}

pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let activity = state
        .activity_repo
        .find_by_id(activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))?;

    Ok(Json(ApiResponse::new(ActivityDto::from(activity))))
}

pub async fn list_activities(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let activities = state.activity_repo.list().await?;
    let dtos: Vec<ActivityDto> = activities.into_iter().map(ActivityDto::from).collect();

    Ok(Json(ApiResponse::new(dtos)))
}

pub async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
    Json(payload): Json<UpdateActivityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut activity = state
        .activity_repo
        .find_by_id(activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))?;

    if let Some(title) = payload.title {
        activity.title = title;
    }
    if let Some(tag) = payload.tag {
        activity.tag = Some(tag);
    }
    if let Some(description) = payload.description {
        activity.description = description;
    }
    if let Some(week) = payload.week {
        activity.week = week;
    }
    if let Some(estimation) = payload.time_estimation_secs {
        activity.time_estimation_secs = estimation;
    }

    let updated = state.activity_repo.update(&activity).await?;

    Ok(Json(ApiResponse::new(ActivityDto::from(updated))))
}

pub async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state
        .activity_repo
        .find_by_id(activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))?;

    state.activity_repo.delete(activity_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
