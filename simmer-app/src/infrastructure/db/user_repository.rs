use super::entities::{
    ingredient, instruction, rating, recipe, user, Ingredient, Instruction, Rating, Recipe, User,
};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, TransactionTrait};

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id).one(&self.db).await
    }

    pub async fn insert(&self, id: &str, display_name: &str) -> Result<user::Model, DbErr> {
        let active = user::ActiveModel {
            id: Set(id.to_string()),
            display_name: Set(display_name.to_string()),
            is_active: Set(true),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(&self.db).await
    }

    pub async fn set_active(&self, id: &str, is_active: bool) -> Result<Option<user::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let mut active: user::ActiveModel = existing.into();
        active.is_active = Set(is_active);
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deleting a user removes their recipes (and everything hanging off
    /// them), but ratings the user issued on other recipes stay behind so
    /// aggregate history is preserved.
    pub async fn delete_cascading(&self, id: &str) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        let recipe_ids: Vec<i32> = Recipe::find()
            .filter(recipe::Column::AuthorId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();

        if !recipe_ids.is_empty() {
            Rating::delete_many()
                .filter(rating::Column::RecipeId.is_in(recipe_ids.clone()))
                .exec(&txn)
                .await?;
            Ingredient::delete_many()
                .filter(ingredient::Column::RecipeId.is_in(recipe_ids.clone()))
                .exec(&txn)
                .await?;
            Instruction::delete_many()
                .filter(instruction::Column::RecipeId.is_in(recipe_ids.clone()))
                .exec(&txn)
                .await?;
            Recipe::delete_many()
                .filter(recipe::Column::Id.is_in(recipe_ids))
                .exec(&txn)
                .await?;
        }

        let res = User::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}
