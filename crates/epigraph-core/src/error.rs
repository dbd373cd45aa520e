//! Centralized error types for Epigraph.

use thiserror::Error;

/// Main error type for Epigraph operations.
#[derive(Error, Debug)]
pub enum EpigraphError {
    #[error("Missing report columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("At least one factor must be selected for an ALL-factors query")]
    EmptyFactorSet,

    #[error("Graph store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Epigraph operations.
pub type EpigraphResult<T> = Result<T, EpigraphError>;

impl EpigraphError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a store-unavailable error from any driver error.
    pub fn store(err: impl std::fmt::Display) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}
