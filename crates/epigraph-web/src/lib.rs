//! Epigraph Web Server
//!
//! Axum-based HTTP layer: CSV uploads into the graph, association query
//! endpoints and template downloads.

pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use epigraph_graph::GraphClient;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Association queries
        .route("/associations/all", post(routes::associations::all_factors))
        .route("/associations/any", post(routes::associations::any_factor))
        // CSV ingestion
        .route("/cpgs", post(routes::ingest::upload_cpgs))
        .route("/articles", post(routes::ingest::upload_articles))
        .route("/factors", post(routes::ingest::upload_factors))
        .route("/microbes", post(routes::ingest::upload_microbes))
        .route("/diseases", post(routes::ingest::upload_diseases))
        .route("/microbe-disease-links", post(routes::ingest::upload_links))
        // Template downloads and counts
        .route("/templates/{entity}", get(routes::templates::download))
        .route("/counts/{label}", get(routes::status::count_label))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::status::root))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(client: GraphClient, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(client);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
