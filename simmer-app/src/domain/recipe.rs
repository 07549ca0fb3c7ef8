use super::RatingStatistics;
use serde::{Deserialize, Serialize};

pub use crate::infrastructure::db::entities::recipe::Difficulty;

/// Submission payload for creating a recipe; children arrive as ordered
/// lists and positions/step numbers are assigned from list order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Difficulty,
    pub category_id: i32,
    pub author_id: String,
    pub ingredients: Vec<IngredientInput>,
    pub instructions: Vec<String>,
}

/// Edit payload. The author never changes on edit; ingredients and
/// instructions replace the stored lists wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub title: String,
    pub description: String,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Difficulty,
    pub category_id: i32,
    pub ingredients: Vec<IngredientInput>,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientInput {
    pub name: String,
    pub quantity: Option<String>,
}

/// Listing row: recipe fields plus the display names and rating statistics
/// a card or search result needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category_id: i32,
    pub category_name: Option<String>,
    pub author_id: String,
    pub author_name: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub average_rating: f64,
    pub total_ratings: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionStep {
    pub step_number: i32,
    pub description: String,
}

/// Everything the details page shows for one recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Difficulty,
    pub category_id: i32,
    pub category_name: Option<String>,
    pub author_id: String,
    pub author_name: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ingredients: Vec<IngredientLine>,
    pub instructions: Vec<InstructionStep>,
    pub statistics: RatingStatistics,
}
