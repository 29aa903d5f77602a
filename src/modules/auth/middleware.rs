use super::service::{self, ApiKey};
use crate::types::Context;
use axum::async_trait;
use axum::extract::{Extension, FromRequestParts};
use axum::http::{header, request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, RequestPartsExt};
use serde_json::json;
use std::sync::Arc;

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Invalid API key" })),
    )
        .into_response()
}

/// Rejects the request unless its `Authorization` header carries a configured API key.
#[derive(Clone, Debug)]
pub struct ApiKeyAuth {
    pub key: ApiKey,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ApiKeyAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|err| {
                tracing::error!("Application context missing from request: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sorry an error occurred" })),
                )
                    .into_response()
            })?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!("Rejected request without a readable authorization header");
                unauthorized()
            })?;

        service::verify_api_key(&ctx.auth.api_keys, auth_header)
            .map(|key| {
                tracing::debug!("Authenticated with key {}", key.fingerprint());
                Self { key }
            })
            .map_err(|err| {
                tracing::warn!("Rejected api key: {err:?}");
                unauthorized()
            })
    }
}
