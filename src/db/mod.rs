//! SQLite pool initialization and migrations

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DatabaseConfig;

pub type Pool = SqlitePool;

/// Open the SQLite pool and apply connection PRAGMAs.
///
/// `PRAGMA foreign_keys` is off by default in SQLite; the cascade behavior of
/// company and internship deletes depends on it being on.
pub async fn init_pool(config: &DatabaseConfig) -> Result<Pool> {
    let url = prepare_sqlite_url(&config.url);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("PRAGMA foreign_keys=ON;").execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .context("Failed to connect to database")?;

    sqlx::query("PRAGMA journal_mode=WAL;").execute(&pool).await.ok();

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &Pool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    info!("Database migrations completed");
    Ok(())
}

/// If using a file-backed SQLite URL, ensure the parent directory exists.
/// Leaves in-memory URLs untouched. Returns possibly-updated URL.
fn prepare_sqlite_url(url: &str) -> String {
    if !url.starts_with("sqlite:") || url.starts_with("sqlite::memory") {
        return url.to_string();
    }

    let rest = url["sqlite:".len()..].trim_start_matches("//");
    let path_part = rest.split('?').next().unwrap_or(rest);
    if path_part.is_empty() {
        return url.to_string();
    }

    if let Some(parent) = std::path::Path::new(path_part).parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }

    // sqlx needs ?mode=rwc to create a missing database file
    if rest.contains('?') {
        format!("sqlite://{}", rest)
    } else {
        format!("sqlite://{}?mode=rwc", path_part)
    }
}
