use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::requests::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::api::dtos::responses::{ApiResponse, CompanyDto};
use crate::domain::models::company::Company;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_company(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCompanyRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Company name must not be empty".into()));
    }

    let company = Company::new(
        payload.name,
        payload.description.unwrap_or_default(),
        payload.admin.unwrap_or_default(),
        payload.departments.unwrap_or_default(),
    );
    let created = state.company_repo.create(&company).await?;

    Ok(Json(ApiResponse::new(CompanyDto::from(created))))
}

pub async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let company = state
        .company_repo
        .find_by_id(company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", company_id)))?;

    Ok(Json(ApiResponse::new(CompanyDto::from(company))))
}

pub async fn list_companies(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let companies = state.company_repo.list().await?;
    let dtos: Vec<CompanyDto> = companies.into_iter().map(CompanyDto::from).collect();

    Ok(Json(ApiResponse::new(dtos)))
}

pub async fn update_company(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<i64>,
    Json(payload): Json<UpdateCompanyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut company = state
        .company_repo
        .find_by_id(company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", company_id)))?;

    if let Some(name) = payload.name {
        company.name = name;
    }
    if let Some(description) = payload.description {
        company.description = description;
    }
    if let Some(admin) = payload.admin {
        company.admin = admin;
    }
    if let Some(departments) = payload.departments {
        company.departments = departments;
    }

    let updated = state.company_repo.update(&company).await?;

    Ok(Json(ApiResponse::new(CompanyDto::from(updated))))
}

pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state
        .company_repo
        .find_by_id(company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", company_id)))?;

    state.company_repo.delete(company_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
