use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use uuid::Uuid;

use super::{Patch, YouTubeVideo};

/// Largest page size accepted by the recipe listing endpoint
pub const MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty '{}'", other)),
        }
    }
}

/// A stored recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Minutes
    pub prep_time: i32,
    /// Minutes
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: Difficulty,
    pub cuisine: Option<String>,
    pub youtube_videos: Vec<YouTubeVideo>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Builds a new recipe with a fresh id and timestamps
    pub fn new(input: NewRecipe) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            ingredients: input.ingredients,
            instructions: input.instructions,
            prep_time: input.prep_time,
            cook_time: input.cook_time,
            servings: input.servings,
            difficulty: input.difficulty,
            cuisine: input.cuisine,
            youtube_videos: input.youtube_videos,
            image_url: input.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update. `updated_at` is bumped only when the patch succeeds.
    pub fn apply_patch(&mut self, patch: RecipePatch) -> Result<(), String> {
        if patch.is_empty() {
            return Err("No update data provided".to_string());
        }

        let mut next = self.clone();
        patch.title.apply_required(&mut next.title, "title")?;
        patch
            .description
            .apply_required(&mut next.description, "description")?;
        patch
            .ingredients
            .apply_required(&mut next.ingredients, "ingredients")?;
        patch
            .instructions
            .apply_required(&mut next.instructions, "instructions")?;
        patch.prep_time.apply_required(&mut next.prep_time, "prep_time")?;
        patch.cook_time.apply_required(&mut next.cook_time, "cook_time")?;
        patch.servings.apply_required(&mut next.servings, "servings")?;
        patch
            .difficulty
            .apply_required(&mut next.difficulty, "difficulty")?;
        patch.cuisine.apply_to_option(&mut next.cuisine);
        patch.image_url.apply_to_option(&mut next.image_url);
        patch.youtube_videos.apply_or_default(&mut next.youtube_videos);

        validate_fields(&next.title, next.prep_time, next.cook_time, next.servings)?;

        next.updated_at = Utc::now();
        *self = next;
        Ok(())
    }
}

/// Request body for creating a recipe
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub youtube_videos: Vec<YouTubeVideo>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewRecipe {
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(&self.title, self.prep_time, self.cook_time, self.servings)
    }
}

fn validate_fields(title: &str, prep_time: i32, cook_time: i32, servings: i32) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title must not be empty".to_string());
    }
    if prep_time < 0 || cook_time < 0 {
        return Err("Prep and cook times must not be negative".to_string());
    }
    if servings < 0 {
        return Err("Servings must not be negative".to_string());
    }
    Ok(())
}

/// Request body for a partial recipe update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipePatch {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub ingredients: Patch<Vec<String>>,
    #[serde(default)]
    pub instructions: Patch<Vec<String>>,
    #[serde(default)]
    pub prep_time: Patch<i32>,
    #[serde(default)]
    pub cook_time: Patch<i32>,
    #[serde(default)]
    pub servings: Patch<i32>,
    #[serde(default)]
    pub difficulty: Patch<Difficulty>,
    #[serde(default)]
    pub cuisine: Patch<String>,
    #[serde(default)]
    pub youtube_videos: Patch<Vec<YouTubeVideo>>,
    #[serde(default)]
    pub image_url: Patch<String>,
}

impl RecipePatch {
    /// True when the request did not mention any field
    pub fn is_empty(&self) -> bool {
        self.title.is_absent()
            && self.description.is_absent()
            && self.ingredients.is_absent()
            && self.instructions.is_absent()
            && self.prep_time.is_absent()
            && self.cook_time.is_absent()
            && self.servings.is_absent()
            && self.difficulty.is_absent()
            && self.cuisine.is_absent()
            && self.youtube_videos.is_absent()
            && self.image_url.is_absent()
    }
}

/// Listing parameters for `GET /api/recipes`
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub search: Option<String>,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for RecipeQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
        }
    }
}

impl RecipeQuery {
    /// Clamps paging to sane bounds and drops blank search terms. A `limit`
    /// of 0 means "no limit" and is raised to `MAX_PAGE_SIZE`.
    pub fn normalized(self) -> Self {
        let limit = match self.limit {
            0 => MAX_PAGE_SIZE,
            n => n.clamp(0, MAX_PAGE_SIZE),
        };
        Self {
            skip: self.skip.max(0),
            limit,
            search: self
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Request body for `POST /api/recipes/suggestions`
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionRequest {
    pub available_ingredients: Vec<String>,
    /// Absent means the default cap; `null` means no cap
    #[serde(default)]
    pub max_results: Patch<usize>,
}

/// One ranked suggestion returned to the client
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecipeSuggestion {
    pub recipe: Recipe,
    pub match_score: f64,
    pub matching_ingredients: Vec<String>,
    pub missing_ingredients: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new_recipe() -> NewRecipe {
        NewRecipe {
            title: "Garlic Rice".to_string(),
            description: "Simple fried rice".to_string(),
            ingredients: vec!["2 cloves garlic".to_string(), "1 cup rice".to_string()],
            instructions: vec!["Cook rice".to_string(), "Fry with garlic".to_string()],
            prep_time: 5,
            cook_time: 20,
            servings: 2,
            difficulty: Difficulty::Easy,
            cuisine: Some("Asian".to_string()),
            youtube_videos: vec![],
            image_url: None,
        }
    }

    #[test]
    fn test_new_recipe_sets_timestamps() {
        let recipe = Recipe::new(sample_new_recipe());
        assert_eq!(recipe.title, "Garlic Rice");
        assert_eq!(recipe.created_at, recipe.updated_at);
    }

    #[test]
    fn test_difficulty_serialization() {
        assert_eq!(serde_json::to_string(&Difficulty::Easy).unwrap(), "\"Easy\"");
        let parsed: Difficulty = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
        assert!(serde_json::from_str::<Difficulty>("\"Impossible\"").is_err());
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert!("medium".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_new_recipe_defaults_optional_fields() {
        let json = r#"{
            "title": "Toast",
            "description": "Bread, toasted",
            "ingredients": ["bread"],
            "instructions": ["toast it"],
            "prep_time": 1,
            "cook_time": 2,
            "servings": 1,
            "difficulty": "Easy"
        }"#;
        let input: NewRecipe = serde_json::from_str(json).unwrap();
        assert_eq!(input.cuisine, None);
        assert!(input.youtube_videos.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut input = sample_new_recipe();
        input.title = "   ".to_string();
        assert_eq!(input.validate().unwrap_err(), "Title must not be empty");
    }

    #[test]
    fn test_validate_rejects_negative_times() {
        let mut input = sample_new_recipe();
        input.cook_time = -1;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        let mut recipe = Recipe::new(sample_new_recipe());
        let before = recipe.clone();
        let err = recipe.apply_patch(RecipePatch::default()).unwrap_err();
        assert_eq!(err, "No update data provided");
        assert_eq!(recipe, before);
    }

    #[test]
    fn test_patch_updates_only_present_fields() {
        let mut recipe = Recipe::new(sample_new_recipe());
        let patch: RecipePatch =
            serde_json::from_str(r#"{"title": "Better Garlic Rice", "servings": 4}"#).unwrap();

        recipe.apply_patch(patch).unwrap();
        assert_eq!(recipe.title, "Better Garlic Rice");
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.description, "Simple fried rice");
        assert_eq!(recipe.cuisine.as_deref(), Some("Asian"));
        assert!(recipe.updated_at >= recipe.created_at);
    }

    #[test]
    fn test_patch_null_clears_optional_field() {
        let mut recipe = Recipe::new(sample_new_recipe());
        let patch: RecipePatch = serde_json::from_str(r#"{"cuisine": null}"#).unwrap();

        recipe.apply_patch(patch).unwrap();
        assert_eq!(recipe.cuisine, None);
    }

    #[test]
    fn test_patch_null_on_required_field_fails_atomically() {
        let mut recipe = Recipe::new(sample_new_recipe());
        let before = recipe.clone();
        let patch: RecipePatch =
            serde_json::from_str(r#"{"cuisine": "Thai", "title": null}"#).unwrap();

        let err = recipe.apply_patch(patch).unwrap_err();
        assert_eq!(err, "Field 'title' cannot be cleared");
        assert_eq!(recipe, before);
    }

    #[test]
    fn test_query_normalization() {
        let query = RecipeQuery {
            skip: -3,
            limit: 5000,
            search: Some("   ".to_string()),
        }
        .normalized();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, MAX_PAGE_SIZE);
        assert_eq!(query.search, None);
    }

    #[test]
    fn test_query_zero_limit_means_max_page() {
        let query = RecipeQuery {
            limit: 0,
            ..RecipeQuery::default()
        }
        .normalized();
        assert_eq!(query.limit, MAX_PAGE_SIZE);

        let query = RecipeQuery {
            limit: -4,
            ..RecipeQuery::default()
        }
        .normalized();
        assert_eq!(query.limit, 0);
    }

    #[test]
    fn test_suggestion_request_max_results_optional() {
        let request: SuggestionRequest =
            serde_json::from_str(r#"{"available_ingredients": ["garlic"]}"#).unwrap();
        assert_eq!(request.max_results, Patch::Absent);
        let request: SuggestionRequest =
            serde_json::from_str(r#"{"available_ingredients": ["garlic"], "max_results": null}"#)
                .unwrap();
        assert_eq!(request.max_results, Patch::Null);
        assert!(serde_json::from_str::<SuggestionRequest>(
            r#"{"available_ingredients": ["garlic"], "max_results": -1}"#
        )
        .is_err());
    }
}
