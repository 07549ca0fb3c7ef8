use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("rating value must be between 1 and 5, got {0}")]
    InvalidRatingValue(i32),

    #[error("user id cannot be empty")]
    MissingUserId,

    #[error("recipe id must be positive, got {0}")]
    InvalidRecipeId(i32),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("recipe {0} not found")]
    RecipeNotFound(i32),

    #[error("category {0} not found")]
    CategoryNotFound(i32),

    #[error("user {0} not found")]
    UserNotFound(String),

    #[error("category name '{0}' is already taken")]
    CategoryNameTaken(String),

    #[error("category {0} still has recipes and cannot be deleted")]
    CategoryInUse(i32),

    #[error("author {0} is suspended")]
    AuthorSuspended(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRatingValue(_)
            | Self::MissingUserId
            | Self::InvalidRecipeId(_)
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::RecipeNotFound(_)
            | Self::CategoryNotFound(_)
            | Self::UserNotFound(_) => StatusCode::NOT_FOUND,
            Self::CategoryNameTaken(_) | Self::CategoryInUse(_) => StatusCode::CONFLICT,
            Self::AuthorSuspended(_) => StatusCode::FORBIDDEN,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        (status, Json(ErrorResponse { message })).into_response()
    }
}
