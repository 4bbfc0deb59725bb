//! # AppError
//!
//! Centralized error handling for the Elaka ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all elaka-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Post, Category, Profile) or not visible
    /// under the current status filter.
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Input validation failure on creation; holds every offending field
    /// so the caller gets one complete report instead of the first miss.
    #[error("validation failed for fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Infrastructure failure (e.g., database down, constraint violation).
    #[error("storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Shorthand for the common "post with this id" case.
    pub fn post_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound("post".into(), id.to_string())
    }
}

/// A specialized Result type for Elaka logic.
pub type Result<T> = std::result::Result<T, AppError>;
