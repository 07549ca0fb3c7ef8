mod moderation_service;
mod rating_service;
mod recipe_service;

pub use moderation_service::ModerationService;
pub use rating_service::{RatingService, MIN_RATINGS_FOR_TOP_SAMPLE};
pub use recipe_service::RecipeService;
