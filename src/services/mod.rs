pub mod ingredients;
pub mod providers;
pub mod recipes;
pub mod suggestions;
pub mod videos;
