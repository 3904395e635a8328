// crates/testsmith-server/src/web/mod.rs
// HTTP layer for testsmith

pub mod api;
pub mod error;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::web::state::AppState;

pub use error::{ApiError, ApiResult};

/// Create the web server router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_router = Router::new()
        .route("/generate-tests", post(api::generate_tests))
        .route("/models", get(api::list_models))
        .route("/health", get(api::health))
        .route("/templates", get(api::list_templates))
        .route(
            "/templates/{language}/{framework}",
            get(api::get_template).put(api::put_template),
        )
        .with_state(state.clone());

    Router::new()
        // Health check at root level
        .route("/health", get(api::health))
        .nest("/api", api_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(state: AppState, host: &str, port: u16) -> crate::Result<()> {
    let app = create_router(state);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(addr = %addr, "testsmith API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
