use super::entities::{category, recipe, Category, Recipe};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};

#[derive(Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<category::Model>, DbErr> {
        Category::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<category::Model>, DbErr> {
        Category::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<category::Model>, DbErr> {
        Category::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
    }

    pub async fn insert(&self, name: &str) -> Result<category::Model, DbErr> {
        let active = category::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        active.insert(&self.db).await
    }

    pub async fn rename(&self, id: i32, name: &str) -> Result<Option<category::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let mut active: category::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        Ok(Some(active.update(&self.db).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let res = Category::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn recipe_count(&self, category_id: i32) -> Result<u64, DbErr> {
        Recipe::find()
            .filter(recipe::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await
    }
}
