//! Association query endpoints.
//!
//! Both endpoints accept a JSON factor selection and answer with a rendered
//! HTML report table, one numbered row per matching CpG site.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::info;

use epigraph_core::report::{ProcessedRow, ReportRow, ReportTable, COLUMN_ORDER};
use epigraph_graph::queries::association::{cpgs_with_all_factors, cpgs_with_any_factor};

use crate::routes::error_response;
use crate::state::AppState;

/// Factor selection submitted by the frontend.
#[derive(Debug, Deserialize)]
pub struct FactorRequest {
    pub factors: Vec<String>,
    /// Display name for the selection, echoed in the report caption.
    #[serde(default)]
    pub cpg_group_name: String,
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate {
    caption: String,
    columns: Vec<String>,
    rows: Vec<ReportRow>,
}

/// POST /api/associations/all - CpGs associated with every selected factor.
pub async fn all_factors(
    State(state): State<AppState>,
    Json(request): Json<FactorRequest>,
) -> Result<Html<String>, (StatusCode, String)> {
    info!(factors = ?request.factors, "ALL-factors association query");
    let rows = cpgs_with_all_factors(&state.client, &request.factors)
        .await
        .map_err(error_response)?;
    render_report(&request.cpg_group_name, rows)
}

/// POST /api/associations/any - CpGs associated with at least one selected
/// factor.
pub async fn any_factor(
    State(state): State<AppState>,
    Json(request): Json<FactorRequest>,
) -> Result<Html<String>, (StatusCode, String)> {
    info!(factors = ?request.factors, "ANY-factor association query");
    let rows = cpgs_with_any_factor(&state.client, &request.factors)
        .await
        .map_err(error_response)?;
    render_report(&request.cpg_group_name, rows)
}

fn render_report(
    caption: &str,
    rows: Vec<ProcessedRow>,
) -> Result<Html<String>, (StatusCode, String)> {
    let table = ReportTable::from_rows(&rows).map_err(error_response)?;

    let template = ReportTemplate {
        caption: caption.to_string(),
        columns: COLUMN_ORDER.iter().map(|c| c.to_string()).collect(),
        rows: table.rows,
    };
    let html = template
        .render()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Html(html))
}
