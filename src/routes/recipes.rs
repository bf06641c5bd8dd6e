use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{NewRecipe, Recipe, RecipePatch, RecipeQuery},
    routes::AppState,
    services::recipes,
};

#[derive(Debug, Serialize)]
pub struct RecipesResponse {
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Ids that are not UUIDs cannot name a stored recipe
fn parse_recipe_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Recipe not found".to_string()))
}

/// Handler for `GET /api/recipes`
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecipeQuery>,
) -> AppResult<Json<RecipesResponse>> {
    let recipes = recipes::list_recipes(state.recipe_store.clone(), query).await?;
    Ok(Json(RecipesResponse { recipes }))
}

/// Handler for `GET /api/recipes/featured`
pub async fn featured(State(state): State<Arc<AppState>>) -> AppResult<Json<RecipesResponse>> {
    let recipes = recipes::featured_recipes(state.recipe_store.clone()).await?;
    Ok(Json(RecipesResponse { recipes }))
}

/// Handler for `POST /api/recipes`
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<NewRecipe>, JsonRejection>,
) -> AppResult<Json<Recipe>> {
    let Json(input) = payload?;

    tracing::info!(
        request_id = %request_id,
        title = %input.title,
        "Creating recipe"
    );

    let recipe = recipes::create_recipe(state.recipe_store.clone(), input).await?;
    Ok(Json(recipe))
}

/// Handler for `GET /api/recipes/:recipe_id`
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(recipe_id): Path<String>,
) -> AppResult<Json<Recipe>> {
    let id = parse_recipe_id(&recipe_id)?;
    let recipe = recipes::get_recipe(state.recipe_store.clone(), id).await?;
    Ok(Json(recipe))
}

/// Handler for `PUT /api/recipes/:recipe_id`
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(recipe_id): Path<String>,
    payload: Result<Json<RecipePatch>, JsonRejection>,
) -> AppResult<Json<Recipe>> {
    let Json(patch) = payload?;
    tracing::info!(request_id = %request_id, recipe_id = %recipe_id, "Updating recipe");

    let id = parse_recipe_id(&recipe_id)?;
    let recipe = recipes::update_recipe(state.recipe_store.clone(), id, patch).await?;
    Ok(Json(recipe))
}

/// Handler for `DELETE /api/recipes/:recipe_id`
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(recipe_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    tracing::info!(request_id = %request_id, recipe_id = %recipe_id, "Deleting recipe");

    let id = parse_recipe_id(&recipe_id)?;
    recipes::delete_recipe(state.recipe_store.clone(), id).await?;
    Ok(Json(MessageResponse {
        message: "Recipe deleted successfully".to_string(),
    }))
}
