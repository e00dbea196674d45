use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub groq_api_key: String,
    pub groq_api_url: String,
    pub groq_model: String,
    /// `None` disables news enrichment.
    pub news_api_key: Option<String>,
    pub news_api_url: String,
    pub news_timeout: Duration,
    pub llm_timeout: Duration,
    pub request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_addr", &self.server_addr)
            .field("groq_api_key", &"<redacted>")
            .field("groq_api_url", &self.groq_api_url)
            .field("groq_model", &self.groq_model)
            .field("news_api_key", &self.news_api_key.as_ref().map(|_| "<redacted>"))
            .field("news_api_url", &self.news_api_url)
            .field("news_timeout", &self.news_timeout)
            .field("llm_timeout", &self.llm_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let groq_api_key = non_empty("GROQ_API_KEY")
            .ok_or_else(|| AppError::ConfigError("GROQ_API_KEY must be set".to_string()))?;
        let news_api_key = non_empty("NEWS_API_KEY");

        // Load server configuration with defaults
        let host = non_empty("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = non_empty("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            groq_api_key,
            groq_api_url: non_empty("GROQ_API_URL").unwrap_or_else(|| DEFAULT_GROQ_API_URL.to_string()),
            groq_model: non_empty("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            news_api_key,
            news_api_url: non_empty("NEWS_API_URL").unwrap_or_else(|| DEFAULT_NEWS_API_URL.to_string()),
            news_timeout: seconds(non_empty("NEWS_TIMEOUT_SECS"), "NEWS_TIMEOUT_SECS", 10)?,
            llm_timeout: seconds(non_empty("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS", 60)?,
            request_timeout: seconds(non_empty("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", 90)?,
        })
    }
}

fn seconds(value: Option<String>, key: &str, default: u64) -> Result<Duration> {
    match value {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(0) => Err(AppError::ConfigError(format!("Invalid {}: must be at least 1", key))),
            Ok(secs) => Ok(Duration::from_secs(secs)),
            Err(e) => Err(AppError::ConfigError(format!("Invalid {}: {}", key, e))),
        },
    }
}
