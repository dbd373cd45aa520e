//! Downloadable CSV templates.
//!
//! Header-only CSV files matching exactly what the upload endpoints parse.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

const CPGS_TEMPLATE: &str = "CpG,Internal ID,Occurrences,Direction,M-Value Baseline,Beta Baseline\n";
const ARTICLES_TEMPLATE: &str = "DOI,Abstract,Summary\n";
const FACTORS_TEMPLATE: &str = "Association,Type\n";
const MICROBES_TEMPLATE: &str =
    "Taxon,Rank,Occurrences,Direction,Mean Abundance,Correlation Coefficient,p Value,q Value\n";
const DISEASES_TEMPLATE: &str = "id,label\n";
const LINKS_TEMPLATE: &str = "Taxon,DOID\n";

fn template_for(entity: &str) -> Option<(&'static str, &'static str)> {
    match entity {
        "cpgs" => Some(("cpgs-template.csv", CPGS_TEMPLATE)),
        "articles" => Some(("articles-template.csv", ARTICLES_TEMPLATE)),
        "factors" => Some(("factors-template.csv", FACTORS_TEMPLATE)),
        "microbes" => Some(("microbes-template.csv", MICROBES_TEMPLATE)),
        "diseases" => Some(("diseases-template.csv", DISEASES_TEMPLATE)),
        "microbe-disease-links" => Some(("microbe-disease-links-template.csv", LINKS_TEMPLATE)),
        _ => None,
    }
}

/// GET /api/templates/{entity}
pub async fn download(Path(entity): Path<String>) -> Result<Response, (StatusCode, String)> {
    let Some((filename, content)) = template_for(&entity) else {
        return Err((
            StatusCode::NOT_FOUND,
            format!("No CSV template for entity '{}'", entity),
        ));
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment;filename={}", filename),
            ),
        ],
        content,
    )
        .into_response())
}
