//! Internship domain model

use super::application::Application;
use super::common::StringUuid;
use super::company::Company;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Internship posting entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub id: StringUuid,
    pub company_id: StringUuid,
    pub title: String,
    pub location: String,
    pub apply_url: String,
    pub date_found: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Internship joined with its application record.
///
/// The application is not optional: one is created in the same transaction as
/// the internship and can only disappear through the cascade delete, so an
/// internship is never handed out without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternshipWithApplication {
    #[serde(flatten)]
    pub internship: Internship,
    pub application: Application,
}

/// Internship joined with its company and application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternshipDetail {
    #[serde(flatten)]
    pub internship: Internship,
    pub company: Company,
    pub application: Application,
}

/// Input for creating an internship under a company
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInternshipInput {
    pub company_id: StringUuid,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(url)]
    pub apply_url: String,
    pub notes: Option<String>,
    /// Defaults to the creation time when omitted
    pub date_found: Option<DateTime<Utc>>,
}

/// Input for updating an internship; omitted fields are left unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInternshipInput {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    #[validate(url)]
    pub apply_url: Option<String>,
    pub notes: Option<String>,
    pub date_found: Option<DateTime<Utc>>,
}
