//! Ingredient normalization and matching.
//!
//! Free-form ingredient lines ("2 cups chopped fresh basil") are reduced to a
//! comparable core ("basil") by a fixed pipeline of text rules, then compared
//! by substring containment in either direction.

use regex::Regex;
use std::sync::LazyLock;

static QUANTITY_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s*(?:cups?|tbsp|tsp|oz|lbs?|g|kg|ml|l|cloves?|pieces?|slices?)")
        .expect("quantity pattern is valid")
});

static PARENTHETICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"));

static MODIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:fresh|dried|chopped|minced|diced|sliced|grated|to taste|optional)\b")
        .expect("modifier pattern is valid")
});

static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,.]").expect("punctuation pattern is valid"));

/// Removes a number and the unit that follows it ("2 cups", "200g").
///
/// The unit is not required to end on a word boundary, so "2 large" loses
/// "2 l" and leaves "arge".
pub fn strip_quantities(input: &str) -> String {
    QUANTITY_UNIT_RE.replace_all(input, "").into_owned()
}

/// Removes every `(...)` group, each up to its first closing parenthesis.
pub fn strip_parentheticals(input: &str) -> String {
    PARENTHETICAL_RE.replace_all(input, "").into_owned()
}

/// Removes preparation words such as "chopped" or "to taste".
pub fn strip_modifiers(input: &str) -> String {
    MODIFIER_RE.replace_all(input, "").into_owned()
}

pub fn strip_punctuation(input: &str) -> String {
    PUNCTUATION_RE.replace_all(input, "").into_owned()
}

/// Maps a raw ingredient line to its comparison form. Total: never fails,
/// and may return an empty string.
pub fn normalize(raw: &str) -> String {
    let text = strip_quantities(raw);
    let text = strip_parentheticals(&text);
    let text = strip_modifiers(&text);
    let text = strip_punctuation(&text);
    text.trim().to_lowercase()
}

/// Outcome of comparing one recipe's ingredients with what the user has.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientMatch {
    /// Fraction of recipe ingredients that are available, in `[0, 1]`
    pub score: f64,
    /// Recipe ingredients found among the available ones, original wording
    pub matched: Vec<String>,
    /// Recipe ingredients not found, original wording
    pub missing: Vec<String>,
}

/// Available ingredients normalized once so they can be matched against
/// many recipes.
#[derive(Debug, Clone)]
pub struct AvailableIngredients {
    normalized: Vec<String>,
}

impl AvailableIngredients {
    pub fn new<S: AsRef<str>>(available: &[S]) -> Self {
        Self {
            normalized: available.iter().map(|s| normalize(s.as_ref())).collect(),
        }
    }

    /// True when any available ingredient contains, or is contained in, the
    /// normalized recipe ingredient. An empty string on either side counts
    /// as contained.
    fn covers(&self, recipe_ingredient: &str) -> bool {
        self.normalized.iter().any(|available| {
            available.contains(recipe_ingredient) || recipe_ingredient.contains(available.as_str())
        })
    }

    /// Splits the recipe's ingredients into matched and missing, keeping the
    /// recipe's order in both lists.
    pub fn match_recipe<S: AsRef<str>>(&self, recipe_ingredients: &[S]) -> IngredientMatch {
        let mut matched = Vec::new();
        let mut missing = Vec::new();

        for original in recipe_ingredients {
            let original = original.as_ref();
            if self.covers(&normalize(original)) {
                matched.push(original.to_string());
            } else {
                missing.push(original.to_string());
            }
        }

        let score = if recipe_ingredients.is_empty() {
            0.0
        } else {
            matched.len() as f64 / recipe_ingredients.len() as f64
        };

        IngredientMatch {
            score,
            matched,
            missing,
        }
    }
}

/// Scores a single recipe against the available ingredients.
pub fn match_ingredients<R, A>(recipe_ingredients: &[R], available: &[A]) -> IngredientMatch
where
    R: AsRef<str>,
    A: AsRef<str>,
{
    AvailableIngredients::new(available).match_recipe(recipe_ingredients)
}
