use crate::types::AppEnvironment;
use std::{env, fmt, str::FromStr, time::Duration};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingVariable(&'static str),
    InvalidVariable(&'static str, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariable(name) => write!(f, "{name} not set"),
            Self::InvalidVariable(name, value) => write!(f, "Invalid {name}: {value:?}"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u16,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub api_keys: Vec<String>,
}

#[derive(Clone)]
pub struct CrawlerConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub max_body_bytes: usize,
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct AnalysisConfig {
    pub max_context_chars: usize,
    pub cache_size: usize,
    pub cache_ttl: Duration,
}

#[derive(Clone)]
pub struct Config {
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub crawler: CrawlerConfig,
    pub gemini: GeminiConfig,
    pub analysis: AnalysisConfig,
}

struct Vars<F: Fn(&str) -> Option<String>>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn required(&self, name: &'static str) -> Result<String, Error> {
        (self.0)(name)
            .filter(|value| !value.trim().is_empty())
            .ok_or(Error::MissingVariable(name))
    }

    fn optional(&self, name: &'static str, default: &str) -> String {
        (self.0)(name)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, Error> {
        match (self.0)(name).filter(|value| !value.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map_err(|_| Error::InvalidVariable(name, raw)),
            None => Ok(default),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let vars = Vars(lookup);

        let host = vars.optional("HOST", "0.0.0.0");
        let port = vars.parsed::<u16>("PORT", 8000)?;
        let environment = AppEnvironment::from(vars.optional("APP_ENV", "development"));

        let api_keys = vars
            .required("API_KEYS")?
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();
        if api_keys.is_empty() {
            return Err(Error::MissingVariable("API_KEYS"));
        }

        let timeout = vars.parsed::<u64>("CRAWLER_TIMEOUT_SECS", 10)?;
        let user_agent = vars.optional("CRAWLER_USER_AGENT", "Mozilla/5.0");
        let max_body_bytes = vars.parsed::<usize>("CRAWLER_MAX_BODY_BYTES", 2 * 1024 * 1024)?;

        let gemini_api_key = vars.required("GEMINI_API_KEY")?;
        let gemini_model = vars.optional("GEMINI_MODEL", "gemini-2.5-flash");
        let gemini_endpoint = vars.optional(
            "GEMINI_ENDPOINT",
            "https://generativelanguage.googleapis.com/v1beta",
        );
        let gemini_timeout = vars.parsed::<u64>("GEMINI_TIMEOUT_SECS", 120)?;

        let max_context_chars = vars.parsed::<usize>("MAX_CONTEXT_CHARS", 8000)?;
        let cache_size = vars.parsed::<usize>("CONTEXT_CACHE_SIZE", 10)?;
        let cache_ttl = vars.parsed::<u64>("CONTEXT_CACHE_TTL_SECS", 900)?;

        Ok(Self {
            app: AppConfig {
                host,
                environment,
                port,
            },
            auth: AuthConfig { api_keys },
            crawler: CrawlerConfig {
                timeout: Duration::from_secs(timeout),
                user_agent,
                max_body_bytes,
            },
            gemini: GeminiConfig {
                api_key: gemini_api_key,
                model: gemini_model,
                endpoint: gemini_endpoint,
                timeout: Duration::from_secs(gemini_timeout),
            },
            analysis: AnalysisConfig {
                max_context_chars,
                cache_size,
                cache_ttl: Duration::from_secs(cache_ttl),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config =
            Config::from_lookup(lookup(&[("API_KEYS", "a"), ("GEMINI_API_KEY", "g")])).unwrap();

        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8000);
        assert!(matches!(config.app.environment, AppEnvironment::Development));
        assert_eq!(config.crawler.timeout, Duration::from_secs(10));
        assert_eq!(config.crawler.max_body_bytes, 2 * 1024 * 1024);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.timeout, Duration::from_secs(120));
        assert_eq!(config.analysis.max_context_chars, 8000);
        assert_eq!(config.analysis.cache_size, 10);
        assert_eq!(config.analysis.cache_ttl, Duration::from_secs(900));
    }

    #[test]
    fn splits_api_keys() {
        let config = Config::from_lookup(lookup(&[
            ("API_KEYS", " first, ,second "),
            ("GEMINI_API_KEY", "g"),
        ]))
        .unwrap();

        assert_eq!(config.auth.api_keys, vec!["first", "second"]);
    }

    #[test]
    fn requires_api_keys() {
        let err = Config::from_lookup(lookup(&[("API_KEYS", " , "), ("GEMINI_API_KEY", "g")]))
            .err()
            .unwrap();
        assert_eq!(err, Error::MissingVariable("API_KEYS"));

        let err = Config::from_lookup(lookup(&[("API_KEYS", "a")])).err().unwrap();
        assert_eq!(err, Error::MissingVariable("GEMINI_API_KEY"));
    }

    #[test]
    fn reads_timeouts_and_limits() {
        let config = Config::from_lookup(lookup(&[
            ("API_KEYS", "a"),
            ("GEMINI_API_KEY", "g"),
            ("GEMINI_TIMEOUT_SECS", "30"),
            ("CRAWLER_MAX_BODY_BYTES", "4096"),
        ]))
        .unwrap();

        assert_eq!(config.gemini.timeout, Duration::from_secs(30));
        assert_eq!(config.crawler.max_body_bytes, 4096);
    }

    #[test]
    fn rejects_invalid_port() {
        let err = Config::from_lookup(lookup(&[
            ("API_KEYS", "a"),
            ("GEMINI_API_KEY", "g"),
            ("PORT", "eighty"),
        ]))
        .err()
        .unwrap();

        assert_eq!(err, Error::InvalidVariable("PORT", "eighty".to_string()));
    }
}
