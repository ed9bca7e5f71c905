//! Application repository

use crate::domain::{
    Application, ApplicationDetail, ApplicationStatus, Company, CreateApplicationInput,
    Internship, StringUuid, UpdateApplicationInput,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<ApplicationDetail>>;
    async fn find_by_internship_id(
        &self,
        internship_id: StringUuid,
    ) -> Result<Option<ApplicationDetail>>;
    async fn create(&self, input: &CreateApplicationInput) -> Result<ApplicationDetail>;
    async fn update(&self, id: StringUuid, input: &UpdateApplicationInput)
        -> Result<ApplicationDetail>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
    async fn list_by_status(&self, status: ApplicationStatus) -> Result<Vec<ApplicationDetail>>;
}

pub struct ApplicationRepositoryImpl {
    pool: SqlitePool,
}

const APPLICATION_SELECT: &str = r#"
    SELECT id, internship_id, status, resume_version, referral_details,
           follow_up_date, notes, created_at, updated_at
    FROM applications
"#;

impl ApplicationRepositoryImpl {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_application(&self, id: StringUuid) -> Result<Option<Application>> {
        let sql = format!("{} WHERE id = ?", APPLICATION_SELECT);
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(application)
    }

    /// Join an application with its internship and that internship's company.
    /// Both must exist: the foreign keys guarantee it.
    async fn attach_context(&self, application: Application) -> Result<ApplicationDetail> {
        let internship = sqlx::query_as::<_, Internship>(
            r#"
            SELECT id, company_id, title, location, apply_url, date_found, notes,
                   created_at, updated_at
            FROM internships
            WHERE id = ?
            "#,
        )
        .bind(application.internship_id)
        .fetch_one(&self.pool)
        .await?;

        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, careers_url, target_roles, preferred_location, logo_url,
                   created_at, updated_at
            FROM companies
            WHERE id = ?
            "#,
        )
        .bind(internship.company_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ApplicationDetail {
            application,
            internship,
            company,
        })
    }
}

#[async_trait]
impl ApplicationRepository for ApplicationRepositoryImpl {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<ApplicationDetail>> {
        match self.fetch_application(id).await? {
            Some(application) => Ok(Some(self.attach_context(application).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_internship_id(
        &self,
        internship_id: StringUuid,
    ) -> Result<Option<ApplicationDetail>> {
        let sql = format!("{} WHERE internship_id = ?", APPLICATION_SELECT);
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(internship_id)
            .fetch_optional(&self.pool)
            .await?;

        match application {
            Some(application) => Ok(Some(self.attach_context(application).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: &CreateApplicationInput) -> Result<ApplicationDetail> {
        let internship_exists: Option<(StringUuid,)> =
            sqlx::query_as("SELECT id FROM internships WHERE id = ?")
                .bind(input.internship_id)
                .fetch_optional(&self.pool)
                .await?;
        if internship_exists.is_none() {
            return Err(AppError::NotFound(format!(
                "Internship {} not found",
                input.internship_id
            )));
        }

        let id = StringUuid::new_v4();
        let now = Utc::now();
        let status = input.status.unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO applications
                (id, internship_id, status, resume_version, referral_details,
                 follow_up_date, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(input.internship_id)
        .bind(status)
        .bind(&input.resume_version)
        .bind(&input.referral_details)
        .bind(input.follow_up_date)
        .bind(&input.notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create application")))
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: StringUuid,
        input: &UpdateApplicationInput,
    ) -> Result<ApplicationDetail> {
        let existing = self
            .fetch_application(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))?;

        let status = input.status.unwrap_or(existing.status);
        let resume_version = input
            .resume_version
            .as_ref()
            .or(existing.resume_version.as_ref());
        let referral_details = input
            .referral_details
            .as_ref()
            .or(existing.referral_details.as_ref());
        let notes = input.notes.as_ref().or(existing.notes.as_ref());
        // Three-state: omitted keeps the stored date, null clears it, a value
        // replaces it.
        let follow_up_date = input.follow_up_date.apply_to(existing.follow_up_date);

        sqlx::query(
            r#"
            UPDATE applications
            SET status = ?, resume_version = ?, referral_details = ?,
                follow_up_date = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status)
        .bind(resume_version)
        .bind(referral_details)
        .bind(follow_up_date)
        .bind(notes)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update application")))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Application {} not found", id)));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_status(&self, status: ApplicationStatus) -> Result<Vec<ApplicationDetail>> {
        let sql = format!("{} WHERE status = ? ORDER BY created_at DESC", APPLICATION_SELECT);
        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        let mut details = Vec::with_capacity(applications.len());
        for application in applications {
            details.push(self.attach_context(application).await?);
        }

        Ok(details)
    }
}
