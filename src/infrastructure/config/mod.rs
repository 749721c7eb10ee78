use crate::domain::search::SortKey;
use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_host: String,
    pub access_token: Option<String>,
    pub http_timeout_secs: u64,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Response cache
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: u64,
    // Listing defaults
    pub default_page_size: u32,
    pub default_sort: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Config {
            api_host: var("API_HOST")
                .ok_or_else(|| AppError::Config("API_HOST is not set".to_string()))?,
            access_token: var("ACCESS_TOKEN"),
            http_timeout_secs: parse_or(var("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS", 20)?,
            environment: match var("ENVIRONMENT").as_deref() {
                Some("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match var("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            cache_enabled: var("CACHE_ENABLED")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(true),
            cache_ttl_secs: parse_or(var("CACHE_TTL_SECS"), "CACHE_TTL_SECS", 60)?,
            cache_max_entries: parse_or(var("CACHE_MAX_ENTRIES"), "CACHE_MAX_ENTRIES", 500)?,
            default_page_size: parse_or(var("DEFAULT_PAGE_SIZE"), "DEFAULT_PAGE_SIZE", 5)?,
            default_sort: var("DEFAULT_SORT").unwrap_or_else(|| "-published_at".to_string()),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn default_sort_key(&self) -> SortKey {
        self.default_sort.parse().unwrap_or_default()
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> AppResult<T> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}
