use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use axum_helpers::errors::messages;
use domain_categories::CategoryError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("New product cannot have an ID")]
    IdOnCreate,

    #[error("Invalid id, id can not be null")]
    MissingId,

    #[error("Invalid ID")]
    IdMismatch { path: i64, body: i64 },

    #[error("Entity not found: id not found")]
    UnknownId(i64),

    #[error("There is no category with this id {0}")]
    UnknownCategory(i64),

    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::IdOnCreate | ProductError::UnknownCategory(_) => {
                AppError::BadRequest(err.to_string())
            }
            ProductError::MissingId => AppError::BadRequest(messages::ID_REQUIRED.to_string()),
            ProductError::IdMismatch { .. } => {
                AppError::BadRequest(messages::INVALID_ID.to_string())
            }
            ProductError::UnknownId(_) => {
                AppError::BadRequest(messages::ENTITY_NOT_FOUND.to_string())
            }
            ProductError::NotFound(_) => AppError::NotFound,
            ProductError::Category(e) => e.into(),
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_helpers::classify;

    #[test]
    fn client_errors_carry_their_message() {
        let cases = [
            (ProductError::IdOnCreate, "New product cannot have an ID"),
            (ProductError::MissingId, "Invalid id, id can not be null"),
            (ProductError::IdMismatch { path: 1, body: 2 }, "Invalid ID"),
            (ProductError::UnknownId(3), "Entity not found: id not found"),
            (
                ProductError::UnknownCategory(9),
                "There is no category with this id 9",
            ),
        ];

        for (error, expected) in cases {
            let (status, messages) = classify(&error.into());
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(messages, vec![expected.to_string()]);
        }
    }

    #[test]
    fn not_found_has_no_message() {
        let (status, messages) = classify(&ProductError::NotFound(1).into());
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(messages.is_empty());
    }
}
