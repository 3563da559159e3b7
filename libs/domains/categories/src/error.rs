use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use axum_helpers::errors::messages;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("New category cannot have an ID")]
    IdOnCreate,

    #[error("Invalid id, id can not be null")]
    MissingId,

    #[error("Invalid ID")]
    IdMismatch { path: i64, body: i64 },

    #[error("Entity not found: id not found")]
    UnknownId(i64),

    #[error("Category not found: {0}")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

/// Convert CategoryError to AppError for standardized error responses
impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::IdOnCreate => AppError::BadRequest(err.to_string()),
            CategoryError::MissingId => AppError::BadRequest(messages::ID_REQUIRED.to_string()),
            CategoryError::IdMismatch { .. } => {
                AppError::BadRequest(messages::INVALID_ID.to_string())
            }
            CategoryError::UnknownId(_) => {
                AppError::BadRequest(messages::ENTITY_NOT_FOUND.to_string())
            }
            CategoryError::NotFound(_) => AppError::NotFound,
            CategoryError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
