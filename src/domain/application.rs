//! Application-tracking domain model

use super::common::{Patch, StringUuid};
use super::company::Company;
use super::internship::Internship;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Application progress status.
///
/// Free-form field: any status may move to any other status directly, the
/// tracker records progress without enforcing a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    NotApplied,
    Applied,
    Interview,
    Rejected,
    Offer,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::NotApplied => "NOT_APPLIED",
            ApplicationStatus::Applied => "APPLIED",
            ApplicationStatus::Interview => "INTERVIEW",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Offer => "OFFER",
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "NOT_APPLIED" => Ok(ApplicationStatus::NotApplied),
            "APPLIED" => Ok(ApplicationStatus::Applied),
            "INTERVIEW" => Ok(ApplicationStatus::Interview),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            "OFFER" => Ok(ApplicationStatus::Offer),
            _ => Err(format!("Unknown application status: {}", s)),
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl sqlx::Type<sqlx::Sqlite> for ApplicationStatus {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for ApplicationStatus {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for ApplicationStatus {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <&str as sqlx::Encode<sqlx::Sqlite>>::encode_by_ref(&self.as_str(), buf)
    }
}

/// Application entity, attached 1:1 to an internship
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: StringUuid,
    pub internship_id: StringUuid,
    pub status: ApplicationStatus,
    pub resume_version: Option<String>,
    pub referral_details: Option<String>,
    pub follow_up_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application joined with its internship and that internship's company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: Application,
    pub internship: Internship,
    pub company: Company,
}

/// Input for creating an application
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationInput {
    pub internship_id: StringUuid,
    pub status: Option<ApplicationStatus>,
    pub resume_version: Option<String>,
    pub referral_details: Option<String>,
    pub follow_up_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Input for updating an application.
///
/// `follow_up_date` is three-state: omitted leaves the stored value alone,
/// explicit `null` clears it, a date sets it.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationInput {
    pub status: Option<ApplicationStatus>,
    pub resume_version: Option<String>,
    pub referral_details: Option<String>,
    #[serde(default)]
    pub follow_up_date: Patch<DateTime<Utc>>,
    pub notes: Option<String>,
}
