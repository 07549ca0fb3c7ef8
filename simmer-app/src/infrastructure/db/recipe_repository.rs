use super::entities::{
    ingredient, instruction, rating, recipe, user, Ingredient, Instruction, Rating, Recipe,
};
use crate::domain::{NewRecipe, RecipeUpdate};
use sea_orm::{
    entity::*, query::*, DatabaseConnection, DatabaseTransaction, DbErr, JoinType, LoaderTrait,
    TransactionTrait,
};

#[derive(Clone)]
pub struct RecipeRepository {
    db: DatabaseConnection,
}

impl RecipeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<recipe::Model>, DbErr> {
        Recipe::find_by_id(id).one(&self.db).await
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    pub async fn find_with_children(
        &self,
        id: i32,
    ) -> Result<Option<(recipe::Model, Vec<ingredient::Model>, Vec<instruction::Model>)>, DbErr>
    {
        let Some(recipe) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let ingredients = recipe
            .find_related(Ingredient)
            .order_by_asc(ingredient::Column::Position)
            .all(&self.db)
            .await?;
        let instructions = recipe
            .find_related(Instruction)
            .order_by_asc(instruction::Column::StepNumber)
            .all(&self.db)
            .await?;

        Ok(Some((recipe, ingredients, instructions)))
    }

    /// Recipes whose author is not suspended, newest first. Every public
    /// listing goes through this filter.
    pub async fn list_by_active_authors(&self) -> Result<Vec<recipe::Model>, DbErr> {
        Recipe::find()
            .join(JoinType::InnerJoin, recipe::Relation::Author.def())
            .filter(user::Column::IsActive.eq(true))
            .order_by_desc(recipe::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<recipe::Model>, DbErr> {
        Recipe::find()
            .filter(recipe::Column::AuthorId.eq(author_id))
            .order_by_desc(recipe::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn load_ingredients(
        &self,
        recipes: &[recipe::Model],
    ) -> Result<Vec<Vec<ingredient::Model>>, DbErr> {
        recipes.load_many(Ingredient, &self.db).await
    }

    pub async fn count_by_category(&self, category_id: i32) -> Result<u64, DbErr> {
        Recipe::find()
            .filter(recipe::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await
    }

    /// Recipe and its ordered children are written as one unit.
    pub async fn create(&self, new: &NewRecipe) -> Result<recipe::Model, DbErr> {
        let txn = self.db.begin().await?;

        let active = recipe::ActiveModel {
            title: Set(new.title.clone()),
            description: Set(new.description.clone()),
            prep_time_minutes: Set(new.prep_time_minutes),
            cook_time_minutes: Set(new.cook_time_minutes),
            servings: Set(new.servings),
            difficulty: Set(new.difficulty),
            category_id: Set(new.category_id),
            author_id: Set(new.author_id.clone()),
            created_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        };
        let model = active.insert(&txn).await?;

        insert_children(&txn, model.id, &new.ingredients, &new.instructions).await?;

        txn.commit().await?;
        Ok(model)
    }

    /// Edits replace the ingredient and instruction lists wholesale; the old
    /// rows are discarded and the submitted ordered lists are re-inserted.
    pub async fn update(&self, id: i32, update: &RecipeUpdate) -> Result<recipe::Model, DbErr> {
        let txn = self.db.begin().await?;

        let existing = Recipe::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("recipe {id} not found")))?;

        let mut active: recipe::ActiveModel = existing.into();
        active.title = Set(update.title.clone());
        active.description = Set(update.description.clone());
        active.prep_time_minutes = Set(update.prep_time_minutes);
        active.cook_time_minutes = Set(update.cook_time_minutes);
        active.servings = Set(update.servings);
        active.difficulty = Set(update.difficulty);
        active.category_id = Set(update.category_id);
        let model = active.update(&txn).await?;

        Ingredient::delete_many()
            .filter(ingredient::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        Instruction::delete_many()
            .filter(instruction::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;

        insert_children(&txn, id, &update.ingredients, &update.instructions).await?;

        txn.commit().await?;
        Ok(model)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        Rating::delete_many()
            .filter(rating::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        Ingredient::delete_many()
            .filter(ingredient::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        Instruction::delete_many()
            .filter(instruction::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        let res = Recipe::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}

async fn insert_children(
    txn: &DatabaseTransaction,
    recipe_id: i32,
    ingredients: &[crate::domain::IngredientInput],
    instructions: &[String],
) -> Result<(), DbErr> {
    for (i, ing) in ingredients.iter().enumerate() {
        let active = ingredient::ActiveModel {
            recipe_id: Set(recipe_id),
            name: Set(ing.name.clone()),
            quantity: Set(ing.quantity.clone()),
            position: Set(i as i32 + 1),
            ..Default::default()
        };
        active.insert(txn).await?;
    }

    for (i, step) in instructions.iter().enumerate() {
        let active = instruction::ActiveModel {
            recipe_id: Set(recipe_id),
            step_number: Set(i as i32 + 1),
            description: Set(step.clone()),
            ..Default::default()
        };
        active.insert(txn).await?;
    }

    Ok(())
}
