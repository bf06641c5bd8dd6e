mod patch;
mod recipe;
mod video;

pub use patch::Patch;
pub use recipe::{
    Difficulty, NewRecipe, Recipe, RecipePatch, RecipeQuery, RecipeSuggestion, SuggestionRequest,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use video::{
    ApiContentDetails, ApiListResponse, ApiSearchId, ApiSearchItem, ApiSnippet, ApiThumbnail,
    ApiThumbnails, ApiVideoItem, YouTubeVideo,
};
