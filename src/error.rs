//! Error types for Bookshelf server

use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;

use crate::models::book::FieldError;

/// Route every degraded request lands on
pub const NOT_FOUND_ROUTE: &str = "/page-not-found";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Submitted record failed schema validation; one entry per violated field
    #[error("Validation error: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Request could not be decoded (malformed form body, wrong content type)
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Handlers only let errors escape when they have no better answer; every such
/// error degrades to the not-found page.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
            }
            AppError::Validation(errors) => {
                tracing::warn!("Unhandled validation error: {}", summarize(errors));
            }
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
            }
        }

        Redirect::to(NOT_FOUND_ROUTE).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
