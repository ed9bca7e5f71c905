//! REST API handlers and shared response types

pub mod application;
pub mod company;
pub mod health;
pub mod internship;

use crate::error::AppError;
use axum::extract::FromRequest;
use serde::{Deserialize, Serialize};

/// JSON body extractor that reports malformed or incomplete payloads as a 400
/// in the standard error shape, instead of axum's default 422 rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Success response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Message response (for delete, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
