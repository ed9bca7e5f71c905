//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::db;
use crate::repository::{
    ApplicationRepositoryImpl, CompanyRepositoryImpl, InternshipRepositoryImpl,
};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub company_repo: Arc<CompanyRepositoryImpl>,
    pub internship_repo: Arc<InternshipRepositoryImpl>,
    pub application_repo: Arc<ApplicationRepositoryImpl>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self {
            company_repo: Arc::new(CompanyRepositoryImpl::new(db_pool.clone())),
            internship_repo: Arc::new(InternshipRepositoryImpl::new(db_pool.clone())),
            application_repo: Arc::new(ApplicationRepositoryImpl::new(db_pool.clone())),
            db_pool,
        }
    }
}

/// Build the HTTP router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready))
        // Company endpoints
        .route(
            "/api/v1/companies",
            get(api::company::list).post(api::company::create),
        )
        .route(
            "/api/v1/companies/{id}",
            get(api::company::get)
                .patch(api::company::update)
                .delete(api::company::delete),
        )
        .route(
            "/api/v1/companies/{id}/internships",
            get(api::company::list_internships),
        )
        // Internship endpoints
        .route("/api/v1/internships", post(api::internship::create))
        .route(
            "/api/v1/internships/{id}",
            get(api::internship::get)
                .patch(api::internship::update)
                .delete(api::internship::delete),
        )
        .route(
            "/api/v1/internships/{id}/application",
            get(api::internship::get_application),
        )
        // Application endpoints
        .route(
            "/api/v1/applications",
            get(api::application::list_by_status).post(api::application::create),
        )
        .route(
            "/api/v1/applications/{id}",
            get(api::application::get)
                .patch(api::application::update)
                .delete(api::application::delete),
        )
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    let db_pool = db::init_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    let http_addr = config.http_addr();
    let state = AppState::new(db_pool);
    let app = build_router(state);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
