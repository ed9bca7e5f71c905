//! InternTrack - internship-application tracker backend
//!
//! This crate provides the REST API and SQLite-backed repositories for
//! tracking companies, internship postings, and per-posting application
//! progress.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repository;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
