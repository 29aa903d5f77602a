use super::{Error, LanguageModel};
use crate::utils::config::GeminiConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Deserialize, Default)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Default)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        let text = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<String>();

        match text.trim().is_empty() {
            true => None,
            false => Some(text.trim().to_string()),
        }
    }
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(cfg: &GeminiConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|err| {
                tracing::error!("Failed to build gemini http client: {err}");
                Error::ClientBuildFailed
            })?;

        Ok(Self {
            client,
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: String) -> Result<String, Error> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let res = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Failed to reach gemini: {err}");
                Error::RequestFailed
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            tracing::error!("Gemini returned status {status}: {body}");
            return Err(Error::UnexpectedStatus(status));
        }

        res.json::<GenerateContentResponse>()
            .await
            .map_err(|err| {
                tracing::error!("Failed to parse gemini response: {err}");
                Error::InvalidResponse
            })?
            .into_text()
            .ok_or_else(|| {
                tracing::warn!("Gemini returned no text for model {}", self.model);
                Error::EmptyResponse
            })
    }
}
