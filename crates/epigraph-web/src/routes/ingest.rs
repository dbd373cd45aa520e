//! CSV upload endpoints.
//!
//! Each endpoint accepts one multipart CSV file, parses it into typed
//! records and writes the records into the graph through the bulk
//! ingestion path. Responses carry a human-readable `detail` message with
//! the number of entities processed.

use axum::{
    extract::{multipart::Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use epigraph_core::csv_import;
use epigraph_graph::ingest;

use crate::routes::error_response;
use crate::state::AppState;

/// Pull the uploaded CSV file out of the multipart body.
///
/// Rejects files whose name does not end in `.csv` before any parsing.
async fn read_csv_upload(multipart: &mut Multipart) -> Result<Vec<u8>, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if !filename.to_lowercase().ends_with(".csv") {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Invalid file format for '{}': expected a .csv file", filename),
            ));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        return Ok(bytes.to_vec());
    }
    Err((
        StatusCode::BAD_REQUEST,
        "No file field in the upload".to_string(),
    ))
}

fn detail(count: usize, noun: &str) -> Json<Value> {
    Json(json!({
        "detail": format!("Successfully processed and added {} {}.", count, noun)
    }))
}

/// POST /api/cpgs
pub async fn upload_cpgs(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, String)> {
    let bytes = read_csv_upload(&mut multipart).await?;
    let records = csv_import::parse_cpgs(&bytes).map_err(error_response)?;
    let count = records.len();
    ingest::ingest_cpgs(&state.client, &records)
        .await
        .map_err(error_response)?;
    info!(count, "CpG upload complete");
    Ok(detail(count, "CpGs"))
}

/// POST /api/articles
pub async fn upload_articles(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, String)> {
    let bytes = read_csv_upload(&mut multipart).await?;
    let records = csv_import::parse_articles(&bytes).map_err(error_response)?;
    let count = records.len();
    ingest::ingest_articles(&state.client, &records)
        .await
        .map_err(error_response)?;
    info!(count, "article upload complete");
    Ok(detail(count, "articles"))
}

/// POST /api/factors
pub async fn upload_factors(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, String)> {
    let bytes = read_csv_upload(&mut multipart).await?;
    let records = csv_import::parse_factors(&bytes).map_err(error_response)?;
    let count = records.len();
    ingest::ingest_factors(&state.client, &records)
        .await
        .map_err(error_response)?;
    info!(count, "factor upload complete");
    Ok(detail(count, "factors"))
}

/// POST /api/microbes
pub async fn upload_microbes(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, String)> {
    let bytes = read_csv_upload(&mut multipart).await?;
    let records = csv_import::parse_microbes(&bytes).map_err(error_response)?;
    let count = records.len();
    ingest::ingest_microbes(&state.client, &records)
        .await
        .map_err(error_response)?;
    info!(count, "microbe upload complete");
    Ok(detail(count, "microbes"))
}

/// POST /api/diseases
pub async fn upload_diseases(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, String)> {
    let bytes = read_csv_upload(&mut multipart).await?;
    let records = csv_import::parse_diseases(&bytes).map_err(error_response)?;
    let count = records.len();
    ingest::ingest_diseases(&state.client, &records)
        .await
        .map_err(error_response)?;
    info!(count, "disease upload complete");
    Ok(detail(count, "diseases"))
}

/// POST /api/microbe-disease-links
pub async fn upload_links(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, String)> {
    let bytes = read_csv_upload(&mut multipart).await?;
    let records = csv_import::parse_microbe_disease_links(&bytes).map_err(error_response)?;
    let created = ingest::link_microbes_to_diseases(&state.client, &records)
        .await
        .map_err(error_response)?;
    info!(created, "microbe-disease link upload complete");
    Ok(detail(created, "microbe-disease associations"))
}
