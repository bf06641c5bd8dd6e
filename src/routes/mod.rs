use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::RecipeStore,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::providers::VideoProvider,
};

pub mod recipes;
pub mod suggestions;
pub mod videos;

/// Shared application state
///
/// Collaborators are injected once at startup; handlers never reach for
/// globals.
pub struct AppState {
    pub recipe_store: Arc<dyn RecipeStore>,
    pub video_provider: Arc<dyn VideoProvider>,
}

impl AppState {
    pub fn new(recipe_store: Arc<dyn RecipeStore>, video_provider: Arc<dyn VideoProvider>) -> Self {
        Self {
            recipe_store,
            video_provider,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        // Video search
        .route("/youtube/search", get(videos::search))
        .route("/youtube/video/:video_id", get(videos::details))
        // Recipes
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route("/recipes/featured", get(recipes::featured))
        .route("/recipes/suggestions", post(suggestions::suggest))
        .route(
            "/recipes/:recipe_id",
            get(recipes::get).put(recipes::update).delete(recipes::delete),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "message": "RecipeCore API is running" })),
    )
}
