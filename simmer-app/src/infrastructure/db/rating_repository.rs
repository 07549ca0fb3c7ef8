use super::entities::{rating, Rating};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};

#[derive(Clone)]
pub struct RatingRepository {
    db: DatabaseConnection,
}

impl RatingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_recipe_and_user(
        &self,
        recipe_id: i32,
        user_id: &str,
    ) -> Result<Option<rating::Model>, DbErr> {
        Rating::find()
            .filter(rating::Column::RecipeId.eq(recipe_id))
            .filter(rating::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Insert a new rating or overwrite the value (and timestamp) of the
    /// existing one for this (recipe, user) pair.
    pub async fn upsert(
        &self,
        recipe_id: i32,
        user_id: &str,
        value: i32,
    ) -> Result<rating::Model, DbErr> {
        if let Some(existing) = self.find_by_recipe_and_user(recipe_id, user_id).await? {
            let mut active: rating::ActiveModel = existing.into();
            active.value = Set(value);
            active.created_at = Set(Some(chrono::Utc::now()));
            active.update(&self.db).await
        } else {
            let active = rating::ActiveModel {
                recipe_id: Set(recipe_id),
                user_id: Set(user_id.to_string()),
                value: Set(value),
                created_at: Set(Some(chrono::Utc::now())),
                ..Default::default()
            };
            active.insert(&self.db).await
        }
    }

    pub async fn delete_by_recipe_and_user(
        &self,
        recipe_id: i32,
        user_id: &str,
    ) -> Result<bool, DbErr> {
        let res = Rating::delete_many()
            .filter(rating::Column::RecipeId.eq(recipe_id))
            .filter(rating::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn values_for_recipe(&self, recipe_id: i32) -> Result<Vec<i32>, DbErr> {
        let ratings = Rating::find()
            .filter(rating::Column::RecipeId.eq(recipe_id))
            .all(&self.db)
            .await?;
        Ok(ratings.into_iter().map(|r| r.value).collect())
    }

    pub async fn count_for_recipe(&self, recipe_id: i32) -> Result<u64, DbErr> {
        Rating::find()
            .filter(rating::Column::RecipeId.eq(recipe_id))
            .count(&self.db)
            .await
    }

    /// All ratings for a recipe, newest first.
    pub async fn list_for_recipe(&self, recipe_id: i32) -> Result<Vec<rating::Model>, DbErr> {
        Rating::find()
            .filter(rating::Column::RecipeId.eq(recipe_id))
            .order_by_desc(rating::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<rating::Model>, DbErr> {
        Rating::find()
            .order_by_desc(rating::Column::CreatedAt)
            .all(&self.db)
            .await
    }
}
