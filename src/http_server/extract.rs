//! Request body extraction.
//!
//! Bodies may arrive as JSON or as `application/x-www-form-urlencoded`.
//! A missing or undecodable body is reported as `None` instead of rejecting
//! the request, so handlers can check authorization before validating input.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A JSON or form body, `None` when absent or malformed
#[derive(Debug)]
pub struct Payload<T>(pub Option<T>);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with(FORM_CONTENT_TYPE))
            .unwrap_or(false);

        let body = if is_form {
            Form::<T>::from_request(req, state).await.ok().map(|Form(v)| v)
        } else {
            Json::<T>::from_request(req, state).await.ok().map(|Json(v)| v)
        };

        Ok(Payload(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        message: String,
    }

    async fn extract(content_type: Option<&str>, body: &'static str) -> Option<Sample> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body)).unwrap();
        let Payload(value) = Payload::<Sample>::from_request(req, &()).await.unwrap();
        value
    }

    #[tokio::test]
    async fn test_json_body() {
        let value = extract(Some("application/json"), r#"{"message":"hi"}"#).await;
        assert_eq!(value, Some(Sample { message: "hi".to_string() }));
    }

    #[tokio::test]
    async fn test_form_body() {
        let value = extract(Some(FORM_CONTENT_TYPE), "message=hola+mundo").await;
        assert_eq!(value, Some(Sample { message: "hola mundo".to_string() }));
    }

    #[tokio::test]
    async fn test_missing_or_malformed_body_is_none() {
        assert_eq!(extract(None, "").await, None);
        assert_eq!(extract(Some("application/json"), "{not json").await, None);
        assert_eq!(extract(Some("application/json"), r#"{"other":1}"#).await, None);
    }
}
