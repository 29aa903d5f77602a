use super::{
    action::Action,
    company::CompanyContext,
    parser, prompts, render,
};
use crate::types::Context;
use chrono::{Datelike, Utc};
use reqwest::Url;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    FetchFailed,
    GenerationFailed,
}

/// Reads the company page, reusing a recent read of the same URL when there is one.
pub async fn load_company(ctx: &Context, url: &Url) -> Result<CompanyContext, Error> {
    if let Some(cached) = ctx.cache.get(url.as_str()).await {
        tracing::debug!("Using cached context for {url}");
        return Ok(cached);
    }

    let page = ctx.crawler.fetch(url).await.map_err(|err| {
        tracing::error!("Failed to fetch company page {url}: {err:?}");
        Error::FetchFailed
    })?;

    let company = CompanyContext::from_page(url, page, ctx.analysis.max_context_chars);
    if company.is_thin() {
        tracing::warn!("Little readable text on {url}, analysis will rely on general knowledge");
    }
    ctx.cache.insert(company.clone()).await;

    Ok(company)
}

async fn generate(ctx: &Context, prompt: String) -> Result<String, Error> {
    ctx.model.generate(prompt).await.map_err(|err| {
        tracing::error!("Failed to generate analysis: {err:?}");
        Error::GenerationFailed
    })
}

/// Runs `action` against the company and renders the answer as Markdown text.
pub async fn analyze(
    ctx: &Context,
    action: &Action,
    company: &CompanyContext,
) -> Result<String, Error> {
    let name = company.name.as_str();
    tracing::info!(
        "Running {action:?} for {name} (model call: {})",
        action.uses_model()
    );

    let result = match action {
        Action::Summary => generate(ctx, prompts::summary(company)).await?,
        Action::Swot => {
            let raw = generate(ctx, prompts::swot(company)).await?;
            let swot = parser::parse_swot(&raw);
            match swot.is_empty() {
                true => raw,
                false => render::swot(name, &swot),
            }
        }
        Action::Financials => {
            let mut financials = parser::extract_financials(&company.text);
            if financials.len() < 2 {
                let raw = generate(ctx, prompts::financials(company)).await?;
                financials.merge(parser::parse_financial_lines(&raw));
            }
            render::financials(name, &financials)
        }
        Action::Segments => {
            let mut segments = parser::extract_segments(&company.text);
            if segments.len() < 2 {
                let raw = generate(ctx, prompts::segments(company)).await?;
                segments.merge(parser::parse_segments(&raw));
            }
            render::segments(name, &segments)
        }
        Action::Trends => {
            let raw = generate(ctx, prompts::trends(company)).await?;
            render::trends(name, &parser::parse_trends(&raw))
        }
        Action::Risks => {
            let raw = generate(ctx, prompts::risks(company)).await?;
            render::risks(name, &parser::parse_risks(&raw).pad())
        }
        Action::Timeline => {
            let raw = generate(ctx, prompts::timeline(company)).await?;
            let events = parser::pad_timeline(parser::parse_timeline(&raw), Utc::now().year());
            render::timeline(name, &events)
        }
        Action::Leadership => {
            let raw = generate(ctx, prompts::leadership(company)).await?;
            render::leadership(name, &parser::parse_leadership(&raw))
        }
        Action::Overview => {
            let raw = generate(ctx, prompts::overview(company)).await?;
            let overview = parser::parse_overview(&raw);
            let financials = parser::extract_financials(&company.text);
            render::overview(name, &overview, &financials)
        }
        Action::InvestorLinks => {
            render::investor_links(name, company.url.as_str(), &company.links)
        }
        Action::Question(question) => {
            generate(ctx, prompts::question(company, question)).await?
        }
    };

    Ok(result.trim().to_string())
}
