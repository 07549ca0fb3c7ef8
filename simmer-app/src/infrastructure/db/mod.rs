pub mod entities;

mod category_repository;
mod rating_repository;
mod recipe_repository;
mod user_repository;

pub use category_repository::CategoryRepository;
pub use rating_repository::RatingRepository;
pub use recipe_repository::RecipeRepository;
pub use user_repository::UserRepository;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::time::Duration;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let migration = include_str!("../../../../migrations/001_initial.sql");
    let backend = db.get_database_backend();

    // Statements are idempotent (CREATE ... IF NOT EXISTS), so rerunning on
    // an existing database is harmless.
    for statement in migration.split(';') {
        let statement = statement.trim();
        if !statement.is_empty() {
            db.execute(Statement::from_string(backend, statement.to_string()))
                .await?;
        }
    }

    Ok(())
}
