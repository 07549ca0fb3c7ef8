use crate::infrastructure::db::entities::{category, user};
use crate::infrastructure::db::{CategoryRepository, UserRepository};
use simmer_errors::AppError;

/// Admin-side user and category management. Deletion semantics are explicit
/// here: users cascade to their recipes (ratings they issued elsewhere are
/// kept), categories refuse to go while recipes still reference them.
pub struct ModerationService {
    users: UserRepository,
    categories: CategoryRepository,
}

impl ModerationService {
    pub fn new(users: UserRepository, categories: CategoryRepository) -> Self {
        Self { users, categories }
    }

    pub async fn register_user(&self, display_name: &str) -> Result<user::Model, AppError> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(AppError::Validation("display name cannot be empty".into()));
        }

        let id = uuid::Uuid::new_v4().to_string();
        tracing::info!(user_id = %id, display_name, "registering user");
        Ok(self.users.insert(&id, display_name).await?)
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<user::Model>, AppError> {
        Ok(self.users.find_by_id(id).await?)
    }

    pub async fn set_user_active(
        &self,
        id: &str,
        is_active: bool,
    ) -> Result<user::Model, AppError> {
        let user = self
            .users
            .set_active(id, is_active)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))?;
        tracing::info!(user_id = id, is_active, "user active flag changed");
        Ok(user)
    }

    pub async fn delete_user(&self, id: &str) -> Result<bool, AppError> {
        let deleted = self.users.delete_cascading(id).await?;
        if deleted {
            tracing::info!(user_id = id, "user deleted with their recipes");
        }
        Ok(deleted)
    }

    pub async fn list_categories(&self) -> Result<Vec<category::Model>, AppError> {
        Ok(self.categories.list().await?)
    }

    pub async fn add_category(&self, name: &str) -> Result<category::Model, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("category name cannot be empty".into()));
        }
        if self.categories.find_by_name(name).await?.is_some() {
            return Err(AppError::CategoryNameTaken(name.to_string()));
        }

        tracing::info!(name, "adding category");
        Ok(self.categories.insert(name).await?)
    }

    pub async fn rename_category(&self, id: i32, name: &str) -> Result<category::Model, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("category name cannot be empty".into()));
        }
        if let Some(existing) = self.categories.find_by_name(name).await? {
            if existing.id != id {
                return Err(AppError::CategoryNameTaken(name.to_string()));
            }
        }

        self.categories
            .rename(id, name)
            .await?
            .ok_or(AppError::CategoryNotFound(id))
    }

    /// Restrict-delete: fails while any recipe still references the
    /// category.
    pub async fn delete_category(&self, id: i32) -> Result<(), AppError> {
        if self.categories.find_by_id(id).await?.is_none() {
            return Err(AppError::CategoryNotFound(id));
        }
        if self.categories.recipe_count(id).await? > 0 {
            return Err(AppError::CategoryInUse(id));
        }

        self.categories.delete(id).await?;
        tracing::info!(category_id = id, "category deleted");
        Ok(())
    }
}
