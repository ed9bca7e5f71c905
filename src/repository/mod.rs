//! Data access repositories
//!
//! One repository per aggregate, each a trait (mockable in tests) with a
//! SQLite-backed implementation.

pub mod application;
pub mod company;
pub mod internship;

pub use application::{ApplicationRepository, ApplicationRepositoryImpl};
pub use company::{CompanyRepository, CompanyRepositoryImpl};
pub use internship::{InternshipRepository, InternshipRepositoryImpl};

use crate::domain::{
    Application, ApplicationStatus, Internship, InternshipWithApplication, StringUuid,
};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Base SELECT for an internship joined with its application. The join is
/// inner: every internship gets its application in the same transaction that
/// creates it, and only the cascade delete removes one.
pub(crate) const INTERNSHIP_WITH_APPLICATION_SELECT: &str = r#"
    SELECT i.id, i.company_id, i.title, i.location, i.apply_url, i.date_found,
           i.notes, i.created_at, i.updated_at,
           a.id AS app_id, a.internship_id AS app_internship_id,
           a.status AS app_status, a.resume_version AS app_resume_version,
           a.referral_details AS app_referral_details,
           a.follow_up_date AS app_follow_up_date, a.notes AS app_notes,
           a.created_at AS app_created_at, a.updated_at AS app_updated_at
    FROM internships i
    INNER JOIN applications a ON a.internship_id = i.id
"#;

/// Flat row produced by [`INTERNSHIP_WITH_APPLICATION_SELECT`]
#[derive(Debug, FromRow)]
pub(crate) struct InternshipApplicationRow {
    pub id: StringUuid,
    pub company_id: StringUuid,
    pub title: String,
    pub location: String,
    pub apply_url: String,
    pub date_found: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub app_id: StringUuid,
    pub app_internship_id: StringUuid,
    pub app_status: ApplicationStatus,
    pub app_resume_version: Option<String>,
    pub app_referral_details: Option<String>,
    pub app_follow_up_date: Option<DateTime<Utc>>,
    pub app_notes: Option<String>,
    pub app_created_at: DateTime<Utc>,
    pub app_updated_at: DateTime<Utc>,
}

impl From<InternshipApplicationRow> for InternshipWithApplication {
    fn from(row: InternshipApplicationRow) -> Self {
        InternshipWithApplication {
            internship: Internship {
                id: row.id,
                company_id: row.company_id,
                title: row.title,
                location: row.location,
                apply_url: row.apply_url,
                date_found: row.date_found,
                notes: row.notes,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            application: Application {
                id: row.app_id,
                internship_id: row.app_internship_id,
                status: row.app_status,
                resume_version: row.app_resume_version,
                referral_details: row.app_referral_details,
                follow_up_date: row.app_follow_up_date,
                notes: row.app_notes,
                created_at: row.app_created_at,
                updated_at: row.app_updated_at,
            },
        }
    }
}
