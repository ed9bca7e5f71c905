//! Company repository integration tests

use chrono::{Duration, Utc};
use interntrack::domain::{
    ApplicationStatus, CreateCompanyInput, CreateInternshipInput, StringUuid,
    UpdateApplicationInput, UpdateCompanyInput, DEFAULT_PREFERRED_LOCATION,
};
use interntrack::error::AppError;
use interntrack::repository::{
    ApplicationRepository, ApplicationRepositoryImpl, CompanyRepository, CompanyRepositoryImpl,
    InternshipRepository, InternshipRepositoryImpl,
};

mod common;

fn acme_input() -> CreateCompanyInput {
    CreateCompanyInput {
        name: "Acme".to_string(),
        careers_url: "https://acme.example/careers".to_string(),
        target_roles: "SWE Intern".to_string(),
        preferred_location: None,
        logo_url: None,
    }
}

fn internship_input(company_id: StringUuid, title: &str) -> CreateInternshipInput {
    CreateInternshipInput {
        company_id,
        title: title.to_string(),
        location: "Remote".to_string(),
        apply_url: "https://acme.example/apply/1".to_string(),
        notes: None,
        date_found: None,
    }
}

#[tokio::test]
async fn test_create_company_applies_defaults() {
    let pool = common::test_pool().await;
    let repo = CompanyRepositoryImpl::new(pool);

    let company = repo.create(&acme_input()).await.unwrap();

    assert!(!company.id.is_nil());
    assert_eq!(company.preferred_location, DEFAULT_PREFERRED_LOCATION);
    assert_eq!(company.logo_url, None);
}

#[tokio::test]
async fn test_list_with_stats_counts_by_application_status() {
    let pool = common::test_pool().await;
    let companies = CompanyRepositoryImpl::new(pool.clone());
    let internships = InternshipRepositoryImpl::new(pool.clone());
    let applications = ApplicationRepositoryImpl::new(pool);

    let company = companies.create(&acme_input()).await.unwrap();
    let first = internships
        .create(&internship_input(company.id, "Backend Intern"))
        .await
        .unwrap();
    internships
        .create(&internship_input(company.id, "Frontend Intern"))
        .await
        .unwrap();

    applications
        .update(
            first.application.id,
            &UpdateApplicationInput {
                status: Some(ApplicationStatus::Interview),
                resume_version: None,
                referral_details: None,
                follow_up_date: Default::default(),
                notes: None,
            },
        )
        .await
        .unwrap();

    let listed = companies.list_with_stats().await.unwrap();
    assert_eq!(listed.len(), 1);

    let stats = &listed[0].stats;
    assert_eq!(stats.total, 2);
    assert_eq!(stats.interview, 1);
    assert_eq!(stats.not_applied, 1);
    assert_eq!(
        stats.total,
        stats.not_applied + stats.applied + stats.interview + stats.rejected + stats.offer
    );
}

#[tokio::test]
async fn test_list_with_stats_empty_company_is_all_zero() {
    let pool = common::test_pool().await;
    let repo = CompanyRepositoryImpl::new(pool);

    repo.create(&acme_input()).await.unwrap();

    let listed = repo.list_with_stats().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].stats.total, 0);
    assert_eq!(listed[0].stats.not_applied, 0);
}

#[tokio::test]
async fn test_find_by_id_orders_internships_newest_first() {
    let pool = common::test_pool().await;
    let companies = CompanyRepositoryImpl::new(pool.clone());
    let internships = InternshipRepositoryImpl::new(pool);

    let company = companies.create(&acme_input()).await.unwrap();

    let older = Utc::now() - Duration::days(10);
    let newer = Utc::now() - Duration::days(1);
    let mut old_input = internship_input(company.id, "Old Posting");
    old_input.date_found = Some(older);
    let mut new_input = internship_input(company.id, "New Posting");
    new_input.date_found = Some(newer);

    internships.create(&old_input).await.unwrap();
    internships.create(&new_input).await.unwrap();

    let detail = companies.find_by_id(company.id).await.unwrap().unwrap();
    assert_eq!(detail.internships.len(), 2);
    assert_eq!(detail.internships[0].internship.title, "New Posting");
    assert_eq!(detail.internships[1].internship.title, "Old Posting");
}

#[tokio::test]
async fn test_find_by_id_missing_returns_none() {
    let pool = common::test_pool().await;
    let repo = CompanyRepositoryImpl::new(pool);

    let result = repo.find_by_id(StringUuid::new_v4()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_update_preserves_omitted_fields() {
    let pool = common::test_pool().await;
    let repo = CompanyRepositoryImpl::new(pool);

    let company = repo.create(&acme_input()).await.unwrap();
    let updated = repo
        .update(
            company.id,
            &UpdateCompanyInput {
                name: Some("Acme Corp".to_string()),
                careers_url: None,
                target_roles: None,
                preferred_location: None,
                logo_url: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Acme Corp");
    assert_eq!(updated.careers_url, company.careers_url);
    assert_eq!(updated.target_roles, company.target_roles);
    assert_eq!(updated.preferred_location, company.preferred_location);
}

#[tokio::test]
async fn test_update_missing_company_is_not_found() {
    let pool = common::test_pool().await;
    let repo = CompanyRepositoryImpl::new(pool);

    let result = repo
        .update(
            StringUuid::new_v4(),
            &UpdateCompanyInput {
                name: Some("Ghost".to_string()),
                careers_url: None,
                target_roles: None,
                preferred_location: None,
                logo_url: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_cascades_to_internships_and_applications() {
    let pool = common::test_pool().await;
    let companies = CompanyRepositoryImpl::new(pool.clone());
    let internships = InternshipRepositoryImpl::new(pool.clone());
    let applications = ApplicationRepositoryImpl::new(pool);

    let company = companies.create(&acme_input()).await.unwrap();
    let internship = internships
        .create(&internship_input(company.id, "Backend Intern"))
        .await
        .unwrap();

    companies.delete(company.id).await.unwrap();

    assert!(companies.find_by_id(company.id).await.unwrap().is_none());
    assert!(internships
        .find_by_id(internship.internship.id)
        .await
        .unwrap()
        .is_none());
    assert!(applications
        .find_by_id(internship.application.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_delete_missing_company_is_not_found() {
    let pool = common::test_pool().await;
    let repo = CompanyRepositoryImpl::new(pool);

    let result = repo.delete(StringUuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
