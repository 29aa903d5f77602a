use super::types::{request, response};
use crate::{
    modules::analysis::{action::Action, analyzer, company},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let url = company::normalize_url(&payload.url).map_err(|err| {
        tracing::warn!("Rejected company url {:?}: {err:?}", payload.url);
        response::Error::InvalidBody("url is not a valid http(s) URL".to_string())
    })?;
    let action = Action::parse(&payload.action);

    let company = analyzer::load_company(&ctx, &url)
        .await
        .map_err(|_| response::Error::FailedToFetchPage)?;

    let result = analyzer::analyze(&ctx, &action, &company)
        .await
        .map_err(|_| response::Error::FailedToGenerateAnalysis)?;

    Ok(response::Success::Analyzed(response::AnalysisResponse {
        result: Some(result),
    }))
}
