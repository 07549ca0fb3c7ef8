use crate::application::{ModerationService, RatingService, RecipeService};
use crate::infrastructure::db::{
    CategoryRepository, RatingRepository, RecipeRepository, UserRepository,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub ratings: Arc<RatingService>,
    pub recipes: Arc<RecipeService>,
    pub moderation: Arc<ModerationService>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection) -> Self {
        let rating_repo = RatingRepository::new(db.clone());
        let recipe_repo = RecipeRepository::new(db.clone());
        let category_repo = CategoryRepository::new(db.clone());
        let user_repo = UserRepository::new(db);

        Self {
            ratings: Arc::new(RatingService::new(rating_repo.clone(), recipe_repo.clone())),
            recipes: Arc::new(RecipeService::new(
                recipe_repo,
                rating_repo,
                category_repo.clone(),
                user_repo.clone(),
            )),
            moderation: Arc::new(ModerationService::new(user_repo, category_repo)),
        }
    }
}
