//! HTTP route handlers.

pub mod associations;
pub mod ingest;
pub mod status;
pub mod templates;

use axum::http::StatusCode;
use epigraph_core::EpigraphError;

/// Map a domain error onto an HTTP status and message.
pub(crate) fn error_response(err: EpigraphError) -> (StatusCode, String) {
    let status = match &err {
        EpigraphError::EmptyFactorSet => StatusCode::UNPROCESSABLE_ENTITY,
        EpigraphError::Validation(_) | EpigraphError::Csv(_) => StatusCode::BAD_REQUEST,
        EpigraphError::MissingColumns(_)
        | EpigraphError::StoreUnavailable(_)
        | EpigraphError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
