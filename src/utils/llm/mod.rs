mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use reqwest::StatusCode;

#[derive(Debug)]
pub enum Error {
    ClientBuildFailed,
    RequestFailed,
    UnexpectedStatus(StatusCode),
    InvalidResponse,
    EmptyResponse,
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: String) -> Result<String, Error>;
}
