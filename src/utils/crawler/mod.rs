mod html;

pub use html::{extract_ir_links, extract_text};

use crate::utils::config::CrawlerConfig;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};

#[derive(Debug)]
pub enum Error {
    ClientBuildFailed,
    RequestFailed,
    UnexpectedStatus(StatusCode),
    InvalidBody,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub text: String,
    pub links: Vec<String>,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Page, Error>;
}

pub struct HttpFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(cfg: &CrawlerConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(cfg.timeout)
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|err| {
                tracing::error!("Failed to build crawler http client: {err}");
                Error::ClientBuildFailed
            })?;

        Ok(Self {
            client,
            max_body_bytes: cfg.max_body_bytes,
        })
    }
}

/// Reads at most `max_bytes` of the body. Anything past the cap is dropped unread.
async fn read_capped(mut res: Response, max_bytes: usize) -> Result<String, reqwest::Error> {
    let mut body = Vec::new();

    while let Some(chunk) = res.chunk().await? {
        let room = max_bytes.saturating_sub(body.len());
        body.extend_from_slice(&chunk[..chunk.len().min(room)]);
        if body.len() >= max_bytes {
            tracing::warn!("Body of {} truncated at {max_bytes} bytes", res.url());
            break;
        }
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Page, Error> {
        let res = self.client.get(url.clone()).send().await.map_err(|err| {
            tracing::error!("Failed to fetch {url}: {err}");
            Error::RequestFailed
        })?;

        if !res.status().is_success() {
            tracing::warn!("Fetching {url} returned status {}", res.status());
            return Err(Error::UnexpectedStatus(res.status()));
        }

        // Redirects may land on another host, relative links resolve against the final URL
        let final_url = res.url().clone();
        let body = read_capped(res, self.max_body_bytes).await.map_err(|err| {
            tracing::error!("Failed to read the body of {url}: {err}");
            Error::InvalidBody
        })?;

        let page = Page {
            text: extract_text(&body),
            links: extract_ir_links(&final_url, &body),
        };
        tracing::debug!(
            "Fetched {url}: {} chars of text, {} investor links",
            page.text.len(),
            page.links.len()
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &'static str) -> Response {
        Response::from(axum::http::Response::new(body))
    }

    #[tokio::test]
    async fn reads_small_bodies_whole() {
        let body = read_capped(response("<p>Acme</p>"), 1024).await.unwrap();

        assert_eq!(body, "<p>Acme</p>");
    }

    #[tokio::test]
    async fn truncates_bodies_over_the_cap() {
        let body = read_capped(response("<p>Acme builds anvils</p>"), 8).await.unwrap();

        assert_eq!(body, "<p>Acme ");
        assert_eq!(extract_text(&body), "Acme");
    }
}
