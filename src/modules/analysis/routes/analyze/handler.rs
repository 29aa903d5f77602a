use super::service::service;
use super::types::{request, response};
use crate::{modules::auth::middleware::ApiKeyAuth, types::Context};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

pub async fn handler(
    _: ApiKeyAuth,
    State(ctx): State<Arc<Context>>,
    payload: Result<Json<request::Payload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => service(ctx, payload).await.into_response(),
        Err(rejection) => {
            tracing::warn!("Rejected analysis request body: {rejection}");
            response::Error::InvalidBody(rejection.body_text()).into_response()
        }
    }
}
