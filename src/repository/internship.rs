//! Internship repository

use super::{InternshipApplicationRow, INTERNSHIP_WITH_APPLICATION_SELECT};
use crate::domain::{
    ApplicationStatus, Company, CreateInternshipInput, InternshipDetail,
    InternshipWithApplication, StringUuid, UpdateInternshipInput,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InternshipRepository: Send + Sync {
    async fn create(&self, input: &CreateInternshipInput) -> Result<InternshipDetail>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<InternshipDetail>>;
    async fn update(&self, id: StringUuid, input: &UpdateInternshipInput)
        -> Result<InternshipDetail>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
    async fn list_by_company(&self, company_id: StringUuid)
        -> Result<Vec<InternshipWithApplication>>;
}

pub struct InternshipRepositoryImpl {
    pool: SqlitePool,
}

impl InternshipRepositoryImpl {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_detail(&self, id: StringUuid) -> Result<Option<InternshipDetail>> {
        let sql = format!("{} WHERE i.id = ?", INTERNSHIP_WITH_APPLICATION_SELECT);
        let row = sqlx::query_as::<_, InternshipApplicationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let joined: InternshipWithApplication = row.into();
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, careers_url, target_roles, preferred_location, logo_url,
                   created_at, updated_at
            FROM companies
            WHERE id = ?
            "#,
        )
        .bind(joined.internship.company_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Some(InternshipDetail {
            internship: joined.internship,
            company,
            application: joined.application,
        }))
    }
}

#[async_trait]
impl InternshipRepository for InternshipRepositoryImpl {
    /// Compound create: the internship and its NOT_APPLIED application are
    /// written in one transaction so no reader ever observes one without the
    /// other.
    #[instrument(skip(self, input))]
    async fn create(&self, input: &CreateInternshipInput) -> Result<InternshipDetail> {
        let mut tx = self.pool.begin().await?;

        let company_exists: Option<(StringUuid,)> =
            sqlx::query_as("SELECT id FROM companies WHERE id = ?")
                .bind(input.company_id)
                .fetch_optional(&mut *tx)
                .await?;
        if company_exists.is_none() {
            return Err(AppError::NotFound(format!(
                "Company {} not found",
                input.company_id
            )));
        }

        let id = StringUuid::new_v4();
        let now = Utc::now();
        let date_found = input.date_found.unwrap_or(now);

        sqlx::query(
            r#"
            INSERT INTO internships
                (id, company_id, title, location, apply_url, date_found, notes,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(input.company_id)
        .bind(&input.title)
        .bind(&input.location)
        .bind(&input.apply_url)
        .bind(date_found)
        .bind(&input.notes)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO applications (id, internship_id, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(StringUuid::new_v4())
        .bind(id)
        .bind(ApplicationStatus::NotApplied)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.fetch_detail(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create internship")))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<InternshipDetail>> {
        self.fetch_detail(id).await
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: StringUuid,
        input: &UpdateInternshipInput,
    ) -> Result<InternshipDetail> {
        let existing = self
            .fetch_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Internship {} not found", id)))?
            .internship;

        let title = input.title.as_ref().unwrap_or(&existing.title);
        let location = input.location.as_ref().unwrap_or(&existing.location);
        let apply_url = input.apply_url.as_ref().unwrap_or(&existing.apply_url);
        let notes = input.notes.as_ref().or(existing.notes.as_ref());
        let date_found = input.date_found.unwrap_or(existing.date_found);

        sqlx::query(
            r#"
            UPDATE internships
            SET title = ?, location = ?, apply_url = ?, notes = ?, date_found = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(title)
        .bind(location)
        .bind(apply_url)
        .bind(notes)
        .bind(date_found)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.fetch_detail(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update internship")))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM internships WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Internship {} not found", id)));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_company(
        &self,
        company_id: StringUuid,
    ) -> Result<Vec<InternshipWithApplication>> {
        let sql = format!(
            "{} WHERE i.company_id = ? ORDER BY i.date_found DESC",
            INTERNSHIP_WITH_APPLICATION_SELECT
        );
        let rows = sqlx::query_as::<_, InternshipApplicationRow>(&sql)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
