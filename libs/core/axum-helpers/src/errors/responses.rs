//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

/// Standard error messages for consistent API responses
pub mod messages {
    pub const INTERNAL_ERROR: &str = "An internal server error occurred";
    pub const INVALID_ID: &str = "Invalid ID";
    pub const ID_REQUIRED: &str = "Invalid id, id can not be null";
    pub const ENTITY_NOT_FOUND: &str = "Entity not found: id not found";
}

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({ "message": ["An internal server error occurred"] })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "message": ["Product name is required.", "Price must be greater than 0"]
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid identifier",
    content_type = "application/json",
    example = json!({ "message": ["Invalid ID"] })
)]
pub struct BadRequestIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(description = "Resource not found")]
pub struct NotFoundResponse;

#[derive(ToResponse)]
#[response(
    description = "Unsupported Media Type",
    content_type = "application/json",
    example = json!({
        "message": ["Expected request with `Content-Type: application/json`"]
    })
)]
pub struct UnsupportedMediaTypeResponse(pub ErrorResponse);
