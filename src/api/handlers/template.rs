use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::requests::{CreateTemplateRequest, TemplateListQuery, UpdateTemplateRequest};
use crate::api::dtos::responses::{ApiResponse, TemplateDto};
use crate::domain::models::template::Template;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_template(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Template name must not be empty".into()));
    }

    state
        .company_repo
        .find_by_id(payload.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", payload.company_id)))?;

    let template = Template::new(
        payload.name,
        payload.department.unwrap_or_default(),
        payload.company_id,
    );
    let activity_ids = payload.activity_ids.unwrap_or_default();
    let created = state.template_repo.create(&template, &activity_ids).await?;
    let activity_ids = state.template_repo.activity_ids(created.id).await?;

    Ok(Json(ApiResponse::new(TemplateDto::from_template(created, activity_ids))))
}

pub async fn get_template(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let template = state
        .template_repo
        .find_by_id(template_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {} not found", template_id)))?;
    let activity_ids = state.template_repo.activity_ids(template_id).await?;

    Ok(Json(ApiResponse::new(TemplateDto::from_template(template, activity_ids))))
}

pub async fn list_templates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TemplateListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let templates = state.template_repo.list(query.company_id).await?;

    let mut dtos = Vec::with_capacity(templates.len());
    for template in templates {
        let activity_ids = state.template_repo.activity_ids(template.id).await?;
        dtos.push(TemplateDto::from_template(template, activity_ids));
    }

    Ok(Json(ApiResponse::new(dtos)))
}

/// Only the name and the activity set are writable; id, company and
/// department always come from the stored row.
pub async fn update_template(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<i64>,
    Json(payload): Json<UpdateTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut template = state
        .template_repo
        .find_by_id(template_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {} not found", template_id)))?;

    if let Some(name) = payload.name {
        template.name = name;
    }

    let updated = state
        .template_repo
        .update(&template, payload.activity_ids.as_deref())
        .await?;
    let activity_ids = state.template_repo.activity_ids(template_id).await?;

    Ok(Json(ApiResponse::new(TemplateDto::from_template(updated, activity_ids))))
}

pub async fn delete_template(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state
        .template_repo
        .find_by_id(template_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {} not found", template_id)))?;

    state.template_repo.delete(template_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
