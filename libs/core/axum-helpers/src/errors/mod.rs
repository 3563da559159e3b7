pub mod handlers;
pub mod responses;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

pub use responses::messages;

/// Error body returned for every failed request that carries a body.
///
/// ```json
/// { "message": ["Product name is required."] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable messages, one per problem found
    pub message: Vec<String>,
}

impl ErrorResponse {
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            message: vec![message.into()],
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own errors into this type; the HTTP status
/// and the visible messages are decided in one place by [`classify`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Malformed request body: {}", .0.join("; "))]
    MalformedBody(Vec<String>),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

/// Maps an error to its HTTP status and the messages shown to the client.
///
/// Server-side failures never leak their cause; the client gets a generic
/// message and the detail goes to the log.
pub fn classify(error: &AppError) -> (StatusCode, Vec<String>) {
    match error {
        AppError::Validation(errors) => (StatusCode::BAD_REQUEST, validation_messages(errors)),
        AppError::MalformedBody(messages) => (StatusCode::BAD_REQUEST, messages.clone()),
        AppError::UnsupportedMediaType(message) => {
            (StatusCode::UNSUPPORTED_MEDIA_TYPE, vec![message.clone()])
        }
        AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, vec![message.clone()]),
        AppError::NotFound => (StatusCode::NOT_FOUND, Vec::new()),
        AppError::Database(_) | AppError::InternalServerError(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            vec![messages::INTERNAL_ERROR.to_string()],
        ),
    }
}

/// One message per invalid field, ordered by field name.
///
/// When a field fails several rules only the first reported one is kept.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .filter_map(|(field, field_errors)| {
            field_errors.first().map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, messages) = classify(&self);

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), error = %self, "Request rejected");
        }

        if messages.is_empty() {
            return status.into_response();
        }

        (status, Json(ErrorResponse { message: messages })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => {
                AppError::MalformedBody(vec![describe_data_error(&e.body_text())])
            }
            JsonRejection::MissingJsonContentType(e) => {
                AppError::UnsupportedMediaType(e.body_text())
            }
            other => AppError::MalformedBody(vec![other.body_text()]),
        }
    }
}

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

const NUMERIC_TYPES: [&str; 10] = [
    "f64", "f32", "i64", "i32", "i16", "i8", "u64", "u32", "u16", "u8",
];

/// Turns a serde data error into a client-facing message.
///
/// A value of the wrong type where a number was expected becomes
/// `"<Field> must be a valid number"`; anything else keeps serde's wording.
fn describe_data_error(text: &str) -> String {
    let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(text);

    if let Some((path, cause)) = detail.split_once(": ") {
        let expects_number = NUMERIC_TYPES
            .iter()
            .any(|ty| cause.contains(&format!("expected {ty}")));
        let field = path.rsplit('.').next().filter(|field| !field.is_empty());

        if let (true, Some(field)) = (expects_number, field) {
            return format!("{} must be a valid number", capitalize(field));
        }
    }

    detail.to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::ValidationError;

    async fn body_of(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[test]
    fn classify_maps_variants_to_statuses() {
        assert_eq!(
            classify(&AppError::BadRequest("Invalid ID".into())),
            (StatusCode::BAD_REQUEST, vec!["Invalid ID".to_string()])
        );
        assert_eq!(
            classify(&AppError::NotFound),
            (StatusCode::NOT_FOUND, Vec::new())
        );
        assert_eq!(
            classify(&AppError::UnsupportedMediaType("nope".into())).0,
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[test]
    fn classify_hides_server_side_detail() {
        let (status, messages) = classify(&AppError::Database(DbErr::Custom(
            "relation \"products\" does not exist".into(),
        )));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(messages, vec![messages::INTERNAL_ERROR.to_string()]);
    }

    #[test]
    fn validation_messages_keep_first_error_per_field_sorted() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "price",
            ValidationError::new("range").with_message("Price must be greater than 0".into()),
        );
        errors.add(
            "name",
            ValidationError::new("required").with_message("Product name is required.".into()),
        );
        errors.add(
            "name",
            ValidationError::new("length").with_message("too long".into()),
        );

        assert_eq!(
            validation_messages(&errors),
            vec![
                "Product name is required.".to_string(),
                "Price must be greater than 0".to_string()
            ]
        );
    }

    #[test]
    fn validation_message_falls_back_to_field_name() {
        let mut errors = ValidationErrors::new();
        errors.add("quantity", ValidationError::new("range"));

        assert_eq!(validation_messages(&errors), vec!["quantity is invalid"]);
    }

    #[test]
    fn numeric_type_mismatch_names_the_field() {
        let text = "Failed to deserialize the JSON body into the target type: price: invalid type: string \"abc\", expected f64 at line 1 column 20";
        assert_eq!(describe_data_error(text), "Price must be a valid number");

        let nested = "Failed to deserialize the JSON body into the target type: category.id: invalid type: string \"x\", expected i64 at line 1 column 30";
        assert_eq!(describe_data_error(nested), "Id must be a valid number");
    }

    #[test]
    fn other_data_errors_keep_serde_detail() {
        let text = "Failed to deserialize the JSON body into the target type: name: invalid type: integer `5`, expected a string at line 1 column 9";
        assert_eq!(
            describe_data_error(text),
            "name: invalid type: integer `5`, expected a string at line 1 column 9"
        );
    }

    #[tokio::test]
    async fn not_found_has_empty_body() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn bad_request_renders_message_list() {
        let response = AppError::BadRequest("Invalid ID".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body, ErrorResponse::single("Invalid ID"));
    }
}
