//! Liveness and count endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use epigraph_graph::queries::inspect::count_vertices;

use crate::routes::error_response;
use crate::state::AppState;

/// GET / - liveness probe.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Epigraph API is running" }))
}

/// GET /api/counts/{label} - number of vertices carrying a label.
pub async fn count_label(
    State(state): State<AppState>,
    Path(label): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let count = count_vertices(&state.client, &label)
        .await
        .map_err(error_response)?;
    Ok(Json(json!({ "label": label, "count": count })))
}
