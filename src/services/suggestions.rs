use std::sync::Arc;

use crate::{
    db::RecipeStore,
    error::{AppError, AppResult},
    models::{Patch, Recipe, RecipeSuggestion, SuggestionRequest},
    services::ingredients::AvailableIngredients,
};

/// Recipes matching less than this fraction of their ingredients are dropped
pub const MIN_MATCH_THRESHOLD: f64 = 0.2;

pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Scores every recipe, keeps those at or above `MIN_MATCH_THRESHOLD`, and
/// returns at most `max_results` of them by descending score. Recipes with
/// equal scores keep their input order.
pub fn rank_suggestions<S: AsRef<str>>(
    recipes: Vec<Recipe>,
    available: &[S],
    max_results: usize,
) -> Vec<RecipeSuggestion> {
    let available = AvailableIngredients::new(available);

    let mut suggestions: Vec<RecipeSuggestion> = recipes
        .into_iter()
        .filter_map(|recipe| {
            let result = available.match_recipe(&recipe.ingredients);
            (result.score >= MIN_MATCH_THRESHOLD).then(|| RecipeSuggestion {
                recipe,
                match_score: result.score,
                matching_ingredients: result.matched,
                missing_ingredients: result.missing,
            })
        })
        .collect();

    // sort_by is stable
    suggestions.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    suggestions.truncate(max_results);
    suggestions
}

/// Suggests recipes for a set of available ingredients
///
/// Loads the whole catalog from the store and ranks it. A missing
/// `max_results` caps the list at `DEFAULT_MAX_RESULTS`; an explicit `null`
/// returns every recipe above the threshold.
pub async fn suggest_recipes(
    store: Arc<dyn RecipeStore>,
    request: SuggestionRequest,
) -> AppResult<Vec<RecipeSuggestion>> {
    if request.available_ingredients.is_empty() {
        return Err(AppError::InvalidInput(
            "Please provide at least one ingredient".to_string(),
        ));
    }

    let max_results = match request.max_results {
        Patch::Absent => DEFAULT_MAX_RESULTS,
        Patch::Null => usize::MAX,
        Patch::Value(cap) => cap,
    };
    let recipes = store.all().await?;
    let catalog_size = recipes.len();

    let suggestions = rank_suggestions(recipes, &request.available_ingredients, max_results);

    tracing::info!(
        available = request.available_ingredients.len(),
        catalog_size,
        returned = suggestions.len(),
        top_score = suggestions.first().map(|s| s.match_score),
        "Recipe suggestions ranked"
    );

    Ok(suggestions)
}
