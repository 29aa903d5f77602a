use crate::modules::{analysis::cache::ContextCache, auth::service::ApiKey};
use crate::utils::{
    config::Config,
    crawler::{self, HttpFetcher, PageFetcher},
    llm::{self, GeminiClient, LanguageModel},
};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.trim().to_lowercase().as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u16,
}

#[derive(Clone)]
pub struct AuthContext {
    pub api_keys: Vec<ApiKey>,
}

#[derive(Clone)]
pub struct AnalysisContext {
    pub max_context_chars: usize,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub auth: AuthContext,
    pub analysis: AnalysisContext,
    pub crawler: Arc<dyn PageFetcher>,
    pub model: Arc<dyn LanguageModel>,
    pub cache: ContextCache,
}

#[derive(Debug)]
pub enum Error {
    Crawler(crawler::Error),
    Model(llm::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crawler(err) => write!(f, "Failed to set up the crawler: {err:?}"),
            Self::Model(err) => write!(f, "Failed to set up the language model: {err:?}"),
        }
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Result<Context, Error>;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Result<Context, Error> {
        let crawler = HttpFetcher::new(&self.crawler).map_err(Error::Crawler)?;
        let model = GeminiClient::new(&self.gemini).map_err(Error::Model)?;

        Ok(Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
            },
            auth: AuthContext {
                api_keys: self
                    .auth
                    .api_keys
                    .iter()
                    .map(|key| ApiKey::new(key))
                    .collect(),
            },
            analysis: AnalysisContext {
                max_context_chars: self.analysis.max_context_chars,
            },
            crawler: Arc::new(crawler),
            model: Arc::new(model),
            cache: ContextCache::new(self.analysis.cache_size, self.analysis.cache_ttl),
        })
    }
}
