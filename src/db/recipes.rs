use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Difficulty, Recipe, RecipePatch, RecipeQuery, YouTubeVideo},
};

/// Persistence for recipe records
///
/// Handlers receive the store through `AppState`, so the backing
/// implementation (Postgres or in-memory) is chosen once at startup.
#[async_trait::async_trait]
pub trait RecipeStore: Send + Sync {
    /// Stores a fully built recipe and returns it as persisted
    async fn insert(&self, recipe: Recipe) -> AppResult<Recipe>;

    async fn get(&self, id: Uuid) -> AppResult<Option<Recipe>>;

    /// Newest first, optionally filtered by a case-insensitive substring
    /// matched against title, description, cuisine and ingredients
    async fn list(&self, query: &RecipeQuery) -> AppResult<Vec<Recipe>>;

    /// The `limit` most recently created recipes
    async fn featured(&self, limit: i64) -> AppResult<Vec<Recipe>>;

    /// Every stored recipe, in no particular order
    async fn all(&self) -> AppResult<Vec<Recipe>>;

    /// Applies a partial update. Returns `None` when no recipe has this id.
    async fn update(&self, id: Uuid, patch: RecipePatch) -> AppResult<Option<Recipe>>;

    /// Returns whether a recipe was removed
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}

/// Escapes `LIKE` wildcards so user input is matched literally
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
    id: Uuid,
    title: String,
    description: String,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    prep_time: i32,
    cook_time: i32,
    servings: i32,
    difficulty: String,
    cuisine: Option<String>,
    youtube_videos: Json<Vec<YouTubeVideo>>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = AppError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let difficulty = row.difficulty.parse::<Difficulty>().map_err(|e| {
            AppError::Internal(format!("Corrupt recipe {}: {}", row.id, e))
        })?;

        Ok(Recipe {
            id: row.id,
            title: row.title,
            description: row.description,
            ingredients: row.ingredients,
            instructions: row.instructions,
            prep_time: row.prep_time,
            cook_time: row.cook_time,
            servings: row.servings,
            difficulty,
            cuisine: row.cuisine,
            youtube_videos: row.youtube_videos.0,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn rows_to_recipes(rows: Vec<RecipeRow>) -> AppResult<Vec<Recipe>> {
    rows.into_iter().map(Recipe::try_from).collect()
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, title, description, ingredients, instructions, prep_time, cook_time,
           servings, difficulty, cuisine, youtube_videos, image_url, created_at, updated_at
    FROM recipes
"#;

/// Recipe store backed by the `recipes` table
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: PgPool,
}

impl PgRecipeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn write_recipe<'e, E>(executor: E, recipe: &Recipe) -> AppResult<()>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query(
            r#"
            INSERT INTO recipes (
                id, title, description, ingredients, instructions, prep_time, cook_time,
                servings, difficulty, cuisine, youtube_videos, image_url, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                ingredients = EXCLUDED.ingredients,
                instructions = EXCLUDED.instructions,
                prep_time = EXCLUDED.prep_time,
                cook_time = EXCLUDED.cook_time,
                servings = EXCLUDED.servings,
                difficulty = EXCLUDED.difficulty,
                cuisine = EXCLUDED.cuisine,
                youtube_videos = EXCLUDED.youtube_videos,
                image_url = EXCLUDED.image_url,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(recipe.id)
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(&recipe.ingredients)
        .bind(&recipe.instructions)
        .bind(recipe.prep_time)
        .bind(recipe.cook_time)
        .bind(recipe.servings)
        .bind(recipe.difficulty.as_str())
        .bind(&recipe.cuisine)
        .bind(Json(&recipe.youtube_videos))
        .bind(&recipe.image_url)
        .bind(recipe.created_at)
        .bind(recipe.updated_at)
        .execute(executor)
        .await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl RecipeStore for PgRecipeStore {
    async fn insert(&self, recipe: Recipe) -> AppResult<Recipe> {
        Self::write_recipe(&self.pool, &recipe).await?;
        tracing::debug!(recipe_id = %recipe.id, "Recipe inserted");
        Ok(recipe)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Recipe>> {
        let row: Option<RecipeRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Recipe::try_from).transpose()
    }

    async fn list(&self, query: &RecipeQuery) -> AppResult<Vec<Recipe>> {
        let pattern = query.search.as_deref().map(escape_like);

        let rows: Vec<RecipeRow> = sqlx::query_as(&format!(
            r#"{}
            WHERE $1::text IS NULL
               OR title ILIKE $1 ESCAPE '\'
               OR description ILIKE $1 ESCAPE '\'
               OR cuisine ILIKE $1 ESCAPE '\'
               OR EXISTS (
                    SELECT 1 FROM unnest(ingredients) AS ingredient
                    WHERE ingredient ILIKE $1 ESCAPE '\'
               )
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3"#,
            SELECT_COLUMNS
        ))
        .bind(pattern)
        .bind(query.skip)
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;

        rows_to_recipes(rows)
    }

    async fn featured(&self, limit: i64) -> AppResult<Vec<Recipe>> {
        let rows: Vec<RecipeRow> = sqlx::query_as(&format!(
            "{} ORDER BY created_at DESC LIMIT $1",
            SELECT_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows_to_recipes(rows)
    }

    async fn all(&self) -> AppResult<Vec<Recipe>> {
        let rows: Vec<RecipeRow> = sqlx::query_as(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await?;

        rows_to_recipes(rows)
    }

    async fn update(&self, id: Uuid, patch: RecipePatch) -> AppResult<Option<Recipe>> {
        let mut tx = self.pool.begin().await?;

        let row: Option<RecipeRow> = sqlx::query_as(&format!(
            "{} WHERE id = $1 FOR UPDATE",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut recipe = Recipe::try_from(row)?;
        recipe.apply_patch(patch).map_err(AppError::InvalidInput)?;

        Self::write_recipe(&mut *tx, &recipe).await?;
        tx.commit().await?;

        tracing::debug!(recipe_id = %id, "Recipe updated");
        Ok(Some(recipe))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(difficulty: &str) -> RecipeRow {
        let now = Utc::now();
        RecipeRow {
            id: Uuid::new_v4(),
            title: "Shakshuka".to_string(),
            description: "Eggs poached in tomato sauce".to_string(),
            ingredients: vec!["4 eggs".to_string(), "1 can tomatoes".to_string()],
            instructions: vec!["Simmer".to_string()],
            prep_time: 10,
            cook_time: 25,
            servings: 2,
            difficulty: difficulty.to_string(),
            cuisine: Some("Middle Eastern".to_string()),
            youtube_videos: Json(vec![]),
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_escape_like_wraps_in_wildcards() {
        assert_eq!(escape_like("pasta"), "%pasta%");
    }

    #[test]
    fn test_escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%_real\\"), "%100\\%\\_real\\\\%");
    }

    #[test]
    fn test_row_to_recipe() {
        let recipe = Recipe::try_from(row("Medium")).unwrap();
        assert_eq!(recipe.title, "Shakshuka");
        assert_eq!(recipe.difficulty, Difficulty::Medium);
        assert_eq!(recipe.ingredients.len(), 2);
    }

    #[test]
    fn test_row_with_unknown_difficulty_is_rejected() {
        let err = Recipe::try_from(row("Extreme")).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
