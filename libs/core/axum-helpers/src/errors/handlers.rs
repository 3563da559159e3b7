use super::AppError;

/// Fallback for unmatched routes.
///
/// Answers 404 with an empty body, same as a missing entity.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
