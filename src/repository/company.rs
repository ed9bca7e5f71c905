//! Company repository

use super::{InternshipApplicationRow, INTERNSHIP_WITH_APPLICATION_SELECT};
use crate::domain::{
    ApplicationStatus, Company, CompanyDetail, CompanyStats, CompanyWithStats,
    CreateCompanyInput, StringUuid, UpdateCompanyInput, DEFAULT_PREFERRED_LOCATION,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::instrument;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn list_with_stats(&self) -> Result<Vec<CompanyWithStats>>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<CompanyDetail>>;
    async fn create(&self, input: &CreateCompanyInput) -> Result<Company>;
    async fn update(&self, id: StringUuid, input: &UpdateCompanyInput) -> Result<Company>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct CompanyRepositoryImpl {
    pool: SqlitePool,
}

impl CompanyRepositoryImpl {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_company(&self, id: StringUuid) -> Result<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, careers_url, target_roles, preferred_location, logo_url,
                   created_at, updated_at
            FROM companies
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }
}

#[async_trait]
impl CompanyRepository for CompanyRepositoryImpl {
    #[instrument(skip(self))]
    async fn list_with_stats(&self) -> Result<Vec<CompanyWithStats>> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, careers_url, target_roles, preferred_location, logo_url,
                   created_at, updated_at
            FROM companies
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        // One grouped pass over internships; an internship whose application is
        // somehow missing counts as NOT_APPLIED.
        let counts: Vec<(StringUuid, ApplicationStatus, i64)> = sqlx::query_as(
            r#"
            SELECT i.company_id, COALESCE(a.status, 'NOT_APPLIED') AS status, COUNT(*) AS n
            FROM internships i
            LEFT JOIN applications a ON a.internship_id = i.id
            GROUP BY i.company_id, COALESCE(a.status, 'NOT_APPLIED')
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut stats_by_company: HashMap<StringUuid, CompanyStats> = HashMap::new();
        for (company_id, status, n) in counts {
            stats_by_company
                .entry(company_id)
                .or_default()
                .record(status, n);
        }

        Ok(companies
            .into_iter()
            .map(|company| {
                let stats = stats_by_company.remove(&company.id).unwrap_or_default();
                CompanyWithStats { company, stats }
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<CompanyDetail>> {
        let Some(company) = self.fetch_company(id).await? else {
            return Ok(None);
        };

        let sql = format!(
            "{} WHERE i.company_id = ? ORDER BY i.date_found DESC",
            INTERNSHIP_WITH_APPLICATION_SELECT
        );
        let rows = sqlx::query_as::<_, InternshipApplicationRow>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(Some(CompanyDetail {
            company,
            internships: rows.into_iter().map(Into::into).collect(),
        }))
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: &CreateCompanyInput) -> Result<Company> {
        let id = StringUuid::new_v4();
        let now = Utc::now();
        let preferred_location = input
            .preferred_location
            .clone()
            .unwrap_or_else(|| DEFAULT_PREFERRED_LOCATION.to_string());

        sqlx::query(
            r#"
            INSERT INTO companies
                (id, name, careers_url, target_roles, preferred_location, logo_url,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.careers_url)
        .bind(&input.target_roles)
        .bind(&preferred_location)
        .bind(&input.logo_url)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.fetch_company(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create company")))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: StringUuid, input: &UpdateCompanyInput) -> Result<Company> {
        let existing = self
            .fetch_company(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Company {} not found", id)))?;

        let name = input.name.as_ref().unwrap_or(&existing.name);
        let careers_url = input.careers_url.as_ref().unwrap_or(&existing.careers_url);
        let target_roles = input
            .target_roles
            .as_ref()
            .unwrap_or(&existing.target_roles);
        let preferred_location = input
            .preferred_location
            .as_ref()
            .unwrap_or(&existing.preferred_location);
        let logo_url = input.logo_url.as_ref().or(existing.logo_url.as_ref());

        sqlx::query(
            r#"
            UPDATE companies
            SET name = ?, careers_url = ?, target_roles = ?, preferred_location = ?,
                logo_url = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(careers_url)
        .bind(target_roles)
        .bind(preferred_location)
        .bind(logo_url)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.fetch_company(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update company")))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM companies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Company {} not found", id)));
        }

        Ok(())
    }
}
