//! Application API handlers

use crate::api::{AppJson, MessageResponse, SuccessResponse};
use crate::domain::{ApplicationStatus, CreateApplicationInput, UpdateApplicationInput};
use crate::error::{AppError, Result};
use crate::repository::ApplicationRepository;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct ListByStatusQuery {
    pub status: ApplicationStatus,
}

/// List applications with a given status, newest first
pub async fn list_by_status(
    State(state): State<AppState>,
    Query(query): Query<ListByStatusQuery>,
) -> Result<impl IntoResponse> {
    let applications = state
        .application_repo
        .list_by_status(query.status)
        .await?;
    Ok(Json(SuccessResponse::new(applications)))
}

/// Get application by ID, with internship and company
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<impl IntoResponse> {
    let application = state
        .application_repo
        .find_by_id(id.into())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))?;
    Ok(Json(SuccessResponse::new(application)))
}

/// Create application
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateApplicationInput>,
) -> Result<impl IntoResponse> {
    input.validate()?;
    let application = state.application_repo.create(&input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(application))))
}

/// Partially update application; followUpDate accepts null to clear
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(input): AppJson<UpdateApplicationInput>,
) -> Result<impl IntoResponse> {
    input.validate()?;
    let application = state.application_repo.update(id.into(), &input).await?;
    Ok(Json(SuccessResponse::new(application)))
}

/// Delete application
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.application_repo.delete(id.into()).await?;
    Ok(Json(MessageResponse::new("Application deleted successfully")))
}
