use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::RecipeStore,
    error::{AppError, AppResult},
    models::{NewRecipe, Recipe, RecipePatch, RecipeQuery},
};

/// Number of recipes shown on the featured shelf
pub const FEATURED_COUNT: i64 = 6;

fn not_found() -> AppError {
    AppError::NotFound("Recipe not found".to_string())
}

pub async fn create_recipe(store: Arc<dyn RecipeStore>, input: NewRecipe) -> AppResult<Recipe> {
    input.validate().map_err(AppError::InvalidInput)?;

    let recipe = store.insert(Recipe::new(input)).await?;
    tracing::info!(
        recipe_id = %recipe.id,
        ingredients = recipe.ingredients.len(),
        store = store.name(),
        "Recipe created"
    );
    Ok(recipe)
}

pub async fn get_recipe(store: Arc<dyn RecipeStore>, id: Uuid) -> AppResult<Recipe> {
    store.get(id).await?.ok_or_else(not_found)
}

pub async fn list_recipes(store: Arc<dyn RecipeStore>, query: RecipeQuery) -> AppResult<Vec<Recipe>> {
    let query = query.normalized();
    let recipes = store.list(&query).await?;
    tracing::debug!(
        search = ?query.search,
        skip = query.skip,
        limit = query.limit,
        returned = recipes.len(),
        "Recipes listed"
    );
    Ok(recipes)
}

/// Most recently created recipes
pub async fn featured_recipes(store: Arc<dyn RecipeStore>) -> AppResult<Vec<Recipe>> {
    store.featured(FEATURED_COUNT).await
}

/// Applies a partial update
///
/// An empty patch is rejected before the recipe is looked up.
pub async fn update_recipe(
    store: Arc<dyn RecipeStore>,
    id: Uuid,
    patch: RecipePatch,
) -> AppResult<Recipe> {
    if patch.is_empty() {
        return Err(AppError::InvalidInput("No update data provided".to_string()));
    }

    let recipe = store.update(id, patch).await?.ok_or_else(not_found)?;
    tracing::info!(recipe_id = %id, "Recipe updated");
    Ok(recipe)
}

pub async fn delete_recipe(store: Arc<dyn RecipeStore>, id: Uuid) -> AppResult<()> {
    if !store.delete(id).await? {
        return Err(not_found());
    }
    tracing::info!(recipe_id = %id, "Recipe deleted");
    Ok(())
}
