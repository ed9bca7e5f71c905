//! Company API handlers

use crate::api::{AppJson, MessageResponse, SuccessResponse};
use crate::domain::{CompanyWithStats, CreateCompanyInput, UpdateCompanyInput};
use crate::error::{AppError, Result};
use crate::repository::{CompanyRepository, InternshipRepository};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;
use validator::Validate;

/// List companies with their application-status stats.
///
/// This read backs the main list view, so it never hands the client an error
/// payload for a query failure: connectivity problems surface as 503, anything
/// else is logged and degrades to an empty list.
pub async fn list(State(state): State<AppState>) -> Response {
    match state.company_repo.list_with_stats().await {
        Ok(companies) => Json(SuccessResponse::new(companies)).into_response(),
        Err(e) if e.is_connectivity() => AppError::Unavailable(e.to_string()).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "companies.list failed, degrading to empty list");
            Json(SuccessResponse::new(Vec::<CompanyWithStats>::new())).into_response()
        }
    }
}

/// Get company by ID, with internships and their applications
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<impl IntoResponse> {
    let company = state
        .company_repo
        .find_by_id(id.into())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", id)))?;
    Ok(Json(SuccessResponse::new(company)))
}

/// Create company
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCompanyInput>,
) -> Result<impl IntoResponse> {
    input.validate()?;
    let company = state.company_repo.create(&input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(company))))
}

/// Partially update company
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(input): AppJson<UpdateCompanyInput>,
) -> Result<impl IntoResponse> {
    input.validate()?;
    let company = state.company_repo.update(id.into(), &input).await?;
    Ok(Json(SuccessResponse::new(company)))
}

/// Delete company; internships and applications go with it
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.company_repo.delete(id.into()).await?;
    Ok(Json(MessageResponse::new("Company deleted successfully")))
}

/// List internships under a company, newest date-found first
pub async fn list_internships(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let internships = state.internship_repo.list_by_company(id.into()).await?;
    Ok(Json(SuccessResponse::new(internships)))
}
