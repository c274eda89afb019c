mod handlers;
mod types;

pub use handlers::AppState;
pub use types::{ErrorEnvelope, StatusResponse, SuccessEnvelope};

use crate::{Result, config::Config, llm::OpenAiVisionClient};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Multipart field name carrying the uploaded images.
pub const IMAGE_FIELD: &str = "images";

pub fn router(state: AppState) -> Router {
    let body_limit = state.upload.body_limit_bytes();

    Router::new()
        .route("/", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let llm = Arc::new(OpenAiVisionClient::new(config.llm.clone()));

    let app_state = AppState {
        llm,
        upload: config.upload.clone(),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
