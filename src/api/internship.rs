//! Internship API handlers

use crate::api::{AppJson, MessageResponse, SuccessResponse};
use crate::domain::{CreateInternshipInput, UpdateInternshipInput};
use crate::error::{AppError, Result};
use crate::repository::{ApplicationRepository, InternshipRepository};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

/// Create internship; its NOT_APPLIED application is created in the same
/// transaction
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateInternshipInput>,
) -> Result<impl IntoResponse> {
    input.validate()?;
    let internship = state.internship_repo.create(&input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(internship))))
}

/// Get internship by ID, with company and application
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<impl IntoResponse> {
    let internship = state
        .internship_repo
        .find_by_id(id.into())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Internship {} not found", id)))?;
    Ok(Json(SuccessResponse::new(internship)))
}

/// Partially update internship
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(input): AppJson<UpdateInternshipInput>,
) -> Result<impl IntoResponse> {
    input.validate()?;
    let internship = state.internship_repo.update(id.into(), &input).await?;
    Ok(Json(SuccessResponse::new(internship)))
}

/// Delete internship; the associated application is removed by cascade
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.internship_repo.delete(id.into()).await?;
    Ok(Json(MessageResponse::new("Internship deleted successfully")))
}

/// Get the application attached to an internship
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_repo
        .find_by_internship_id(id.into())
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Application for internship {} not found", id))
        })?;
    Ok(Json(SuccessResponse::new(application)))
}
