use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::RecipeStore,
    error::{AppError, AppResult},
    models::{Recipe, RecipePatch, RecipeQuery},
};

/// In-process recipe store used when no database is configured
#[derive(Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<HashMap<Uuid, Recipe>>,
}

impl MemoryRecipeStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_search(recipe: &Recipe, needle_lower: &str) -> bool {
    contains_ignore_case(&recipe.title, needle_lower)
        || contains_ignore_case(&recipe.description, needle_lower)
        || recipe
            .cuisine
            .as_deref()
            .is_some_and(|c| contains_ignore_case(c, needle_lower))
        || recipe
            .ingredients
            .iter()
            .any(|i| contains_ignore_case(i, needle_lower))
}

fn newest_first(mut recipes: Vec<Recipe>) -> Vec<Recipe> {
    recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
    recipes
}

#[async_trait::async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn insert(&self, recipe: Recipe) -> AppResult<Recipe> {
        let mut recipes = self.recipes.write().await;
        recipes.insert(recipe.id, recipe.clone());
        Ok(recipe)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes.get(&id).cloned())
    }

    async fn list(&self, query: &RecipeQuery) -> AppResult<Vec<Recipe>> {
        let needle = query.search.as_deref().map(str::to_lowercase);
        let recipes = self.recipes.read().await;

        let filtered: Vec<Recipe> = recipes
            .values()
            .filter(|r| needle.as_deref().map_or(true, |n| matches_search(r, n)))
            .cloned()
            .collect();

        Ok(newest_first(filtered)
            .into_iter()
            .skip(query.skip.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect())
    }

    async fn featured(&self, limit: i64) -> AppResult<Vec<Recipe>> {
        let recipes = self.recipes.read().await;
        let mut all = newest_first(recipes.values().cloned().collect());
        all.truncate(limit.max(0) as usize);
        Ok(all)
    }

    async fn all(&self) -> AppResult<Vec<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes.values().cloned().collect())
    }

    async fn update(&self, id: Uuid, patch: RecipePatch) -> AppResult<Option<Recipe>> {
        let mut recipes = self.recipes.write().await;
        let Some(recipe) = recipes.get_mut(&id) else {
            return Ok(None);
        };

        recipe.apply_patch(patch).map_err(AppError::InvalidInput)?;
        Ok(Some(recipe.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut recipes = self.recipes.write().await;
        Ok(recipes.remove(&id).is_some())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
