use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RecipeSuggestion, SuggestionRequest},
    routes::AppState,
    services::suggestions,
};

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<RecipeSuggestion>,
}

/// Handler for `POST /api/recipes/suggestions`
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<SuggestionRequest>, JsonRejection>,
) -> AppResult<Json<SuggestionsResponse>> {
    let Json(request) = payload?;

    tracing::info!(
        request_id = %request_id,
        available_count = request.available_ingredients.len(),
        max_results = ?request.max_results,
        "Processing suggestion request"
    );

    let suggestions =
        suggestions::suggest_recipes(state.recipe_store.clone(), request).await?;

    tracing::info!(
        request_id = %request_id,
        returned = suggestions.len(),
        "Suggestions completed"
    );

    Ok(Json(SuggestionsResponse { suggestions }))
}
