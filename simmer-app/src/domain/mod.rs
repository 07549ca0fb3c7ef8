mod rating;
mod recipe;
mod search;

pub use rating::RatingStatistics;
pub use recipe::{
    Difficulty, IngredientInput, IngredientLine, InstructionStep, NewRecipe, RecipeDetails,
    RecipeSummary, RecipeUpdate,
};
pub use search::SearchResults;
