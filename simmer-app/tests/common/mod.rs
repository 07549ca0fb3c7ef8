#![allow(dead_code)]

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbBackend, Schema};
use simmer_app::domain::{Difficulty, IngredientInput, NewRecipe};
use simmer_app::infrastructure::db::entities;
use simmer_app::AppContext;

/// Fresh in-memory SQLite database with the schema built from the entities.
/// A single pooled connection keeps every handle on the same database.
pub async fn setup() -> AppContext {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("connect to sqlite");

    let schema = Schema::new(DbBackend::Sqlite);
    let backend = db.get_database_backend();
    let tables = [
        schema.create_table_from_entity(entities::User),
        schema.create_table_from_entity(entities::Category),
        schema.create_table_from_entity(entities::Recipe),
        schema.create_table_from_entity(entities::Ingredient),
        schema.create_table_from_entity(entities::Instruction),
        schema.create_table_from_entity(entities::Rating),
    ];
    for table in tables {
        db.execute(backend.build(&table)).await.expect("create table");
    }

    AppContext::new(db)
}

pub async fn seed_user(ctx: &AppContext, display_name: &str) -> entities::user::Model {
    ctx.moderation
        .register_user(display_name)
        .await
        .expect("register user")
}

pub async fn seed_category(ctx: &AppContext, name: &str) -> entities::category::Model {
    ctx.moderation.add_category(name).await.expect("add category")
}

pub fn recipe_input(title: &str, category_id: i32, author_id: &str) -> NewRecipe {
    NewRecipe {
        title: title.to_string(),
        description: format!("{title} description"),
        prep_time_minutes: Some(10),
        cook_time_minutes: Some(25),
        servings: Some(4),
        difficulty: Difficulty::Medium,
        category_id,
        author_id: author_id.to_string(),
        ingredients: vec![
            IngredientInput {
                name: "flour".to_string(),
                quantity: Some("200 g".to_string()),
            },
            IngredientInput {
                name: "butter".to_string(),
                quantity: Some("100 g".to_string()),
            },
        ],
        instructions: vec![
            "Mix the dry ingredients.".to_string(),
            "Bake until golden.".to_string(),
        ],
    }
}

pub async fn seed_recipe(
    ctx: &AppContext,
    title: &str,
    category_id: i32,
    author_id: &str,
) -> entities::recipe::Model {
    ctx.recipes
        .create_recipe(&recipe_input(title, category_id, author_id))
        .await
        .expect("create recipe")
}
