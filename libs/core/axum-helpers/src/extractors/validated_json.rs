//! JSON extractors: plain parsing and parsing plus validation.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that reports parse failures as [`AppError`].
///
/// Use it when the handler must inspect the payload before validating it.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}

/// JSON extractor with automatic validation.
///
/// Validates the request body using the `validator` crate's `Validate` trait.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct NewCategory {
///     #[validate(length(min = 1, max = 100))]
///     name: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<NewCategory>) -> String {
///     payload.name
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(data) = JsonBody::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorResponse;
    use axum::{
        Router,
        body::Body,
        http::{self, StatusCode},
        response::IntoResponse,
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "Name must not be empty"))]
        name: String,
        #[allow(dead_code)]
        amount: Option<f64>,
    }

    async fn handler(ValidatedJson(payload): ValidatedJson<Payload>) -> impl IntoResponse {
        payload.name
    }

    async fn send(body: &'static str, content_type: Option<&str>) -> (StatusCode, Vec<u8>) {
        let app = Router::new().route("/", post(handler));
        let mut request = http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            request = request.header(http::header::CONTENT_TYPE, content_type);
        }
        let response = app
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn accepts_valid_payload() {
        let (status, body) = send(r#"{"name":"Widget"}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Widget");
    }

    #[tokio::test]
    async fn rejects_invalid_payload_with_message_list() {
        let (status, body) = send(r#"{"name":""}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.message, vec!["Name must not be empty"]);
    }

    #[tokio::test]
    async fn rejects_non_numeric_number() {
        let (status, body) = send(
            r#"{"name":"Widget","amount":"lots"}"#,
            Some("application/json"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.message, vec!["Amount must be a valid number"]);
    }

    #[tokio::test]
    async fn rejects_missing_content_type() {
        let (status, _) = send(r#"{"name":"Widget"}"#, None).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
