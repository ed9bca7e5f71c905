//! Company domain model

use super::application::ApplicationStatus;
use super::common::StringUuid;
use super::internship::InternshipWithApplication;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Preferred location used when a company is created without one
pub const DEFAULT_PREFERRED_LOCATION: &str = "Mumbai, India";

/// Company entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: StringUuid,
    pub name: String,
    pub careers_url: String,
    pub target_roles: String,
    pub preferred_location: String,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-company application status counts.
///
/// `total` always equals the sum of the five buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyStats {
    pub total: i64,
    pub not_applied: i64,
    pub applied: i64,
    pub interview: i64,
    pub rejected: i64,
    pub offer: i64,
}

impl CompanyStats {
    /// Count `n` internships whose application has the given status
    pub fn record(&mut self, status: ApplicationStatus, n: i64) {
        self.total += n;
        match status {
            ApplicationStatus::NotApplied => self.not_applied += n,
            ApplicationStatus::Applied => self.applied += n,
            ApplicationStatus::Interview => self.interview += n,
            ApplicationStatus::Rejected => self.rejected += n,
            ApplicationStatus::Offer => self.offer += n,
        }
    }
}

/// Company as returned by the list endpoint, with computed stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyWithStats {
    #[serde(flatten)]
    pub company: Company,
    pub stats: CompanyStats,
}

/// Company with its internships (each carrying its application),
/// ordered by date found, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub internships: Vec<InternshipWithApplication>,
}

/// Input for creating a company
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(url)]
    pub careers_url: String,
    #[validate(length(min = 1))]
    pub target_roles: String,
    pub preferred_location: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// Input for updating a company; omitted fields are left unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(url)]
    pub careers_url: Option<String>,
    #[validate(length(min = 1))]
    pub target_roles: Option<String>,
    pub preferred_location: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stats_buckets_sum_to_total() {
        let mut stats = CompanyStats::default();
        stats.record(ApplicationStatus::NotApplied, 2);
        stats.record(ApplicationStatus::Interview, 1);
        stats.record(ApplicationStatus::Offer, 3);

        assert_eq!(stats.total, 6);
        assert_eq!(
            stats.total,
            stats.not_applied + stats.applied + stats.interview + stats.rejected + stats.offer
        );
    }

    #[test]
    fn test_create_input_requires_name() {
        let input = CreateCompanyInput {
            name: String::new(),
            careers_url: "https://acme.example/careers".to_string(),
            target_roles: "SWE Intern".to_string(),
            preferred_location: None,
            logo_url: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_input_rejects_bad_url() {
        let input = CreateCompanyInput {
            name: "Acme".to_string(),
            careers_url: "not a url".to_string(),
            target_roles: "SWE Intern".to_string(),
            preferred_location: None,
            logo_url: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_company_json_uses_camel_case() {
        let company = Company {
            id: StringUuid::new_v4(),
            name: "Acme".to_string(),
            careers_url: "https://acme.example/careers".to_string(),
            target_roles: "SWE Intern".to_string(),
            preferred_location: DEFAULT_PREFERRED_LOCATION.to_string(),
            logo_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&company).unwrap();
        assert!(json.get("careersUrl").is_some());
        assert!(json.get("preferredLocation").is_some());
        assert!(json.get("careers_url").is_none());
    }
}
