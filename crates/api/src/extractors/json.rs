//! JSON body extractor with planner error responses.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::error::ApiError;

/// Like [`axum::Json`], but malformed bodies are reported as
/// `400 validation_error` in the standard error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header::CONTENT_TYPE};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    fn request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let AppJson(payload) = AppJson::<Payload>::from_request(request(r#"{"name":"eng"}"#), &())
            .await
            .unwrap();
        assert_eq!(payload.name, "eng");
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_error() {
        let err = AppJson::<Payload>::from_request(request("{not json"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_field_is_validation_error() {
        let err = AppJson::<Payload>::from_request(request("{}"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(msg) if msg.contains("name")));
    }
}
