use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::requests::{CreateUserRequest, UpdateUserRequest};
use crate::api::dtos::responses::{ApiResponse, UserDto};
use crate::api::extractors::bearer::MaybeBearer;
use crate::domain::models::user::{User, UserRole, UserUpdate};
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.get_by_id(user_id).await?;

    Ok(Json(ApiResponse::new(UserDto::from(user))))
}

pub async fn get_user_by_email(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.get_by_email(&email).await?;

    Ok(Json(ApiResponse::new(UserDto::from(user))))
}

pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let employees = state.user_service.list_employees(user_id).await?;
    let dtos: Vec<UserDto> = employees.into_iter().map(UserDto::from).collect();

    Ok(Json(ApiResponse::new(dtos)))
}

/// Creates a user reporting to the manager named in the path. The manager id
/// is taken from the route, never from ambient request state.
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    Path(manager_id): Path<i64>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = match payload.role.as_deref() {
        Some(role) => UserRole::parse(role)
            .ok_or_else(|| AppError::Validation(format!("Unknown role: {}", role)))?,
        None => UserRole::Employee,
    };

    let user = User::new(
        payload.email,
        payload.first_name,
        payload.last_name,
        role,
        payload.department.unwrap_or_default(),
        payload.company_id,
        Some(manager_id),
    );

    let created = state.user_service.create(user, &payload.password).await?;

    Ok(Json(ApiResponse::new(UserDto::from(created))))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    MaybeBearer(token): MaybeBearer,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let update = UserUpdate {
        email: payload.email,
        first_name: payload.first_name,
        last_name: payload.last_name,
        new_password: payload.new_password,
    };

    let updated = state
        .user_service
        .update(user_id, update, token.as_deref())
        .await?;

    Ok(Json(ApiResponse::new(UserDto::from(updated))))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.user_service.delete(user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
