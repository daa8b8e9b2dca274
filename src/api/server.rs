use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use http::{Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::api::state::AppState;
use crate::core::{AppConfig, db::async_db};
use crate::gemini::GeminiClient;
use crate::search::{FastEmbedder, VectorIndex};

/// Only the configured browser origin may call the API and only with
/// POST.
fn cors(config: &AppConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::exact(config.allowed_origin.clone()))
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

pub fn app(shared_state: Arc<AppState>) -> Router {
    let cors = cors(&shared_state.config);

    Router::new()
        // API routes
        .nest("/api", routes::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::clone(&shared_state))
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> Result<()> {
    let db = async_db(&config.vec_db_path).await?;
    crate::core::db::initialize(&db).await?;

    let embedder = Arc::new(FastEmbedder::new()?);
    let index = Arc::new(VectorIndex::new(db, embedder));
    let client = Arc::new(GeminiClient::new(&config.genai_base_url));

    tracing::debug!(
        "Model candidates in priority order: {}",
        config.model_candidates.join(", ")
    );

    let app_state = AppState::new(config, index, client);
    let shared_state = Arc::new(app_state);
    let app = app(Arc::clone(&shared_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
