use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{AppError, Result};

/// Most articles ever folded into a digest.
pub const MAX_ARTICLES: usize = 5;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Default, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Client for the news-search endpoint. Only built when an API key exists.
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5).min(timeout))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build news HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Returns the digest for `topic`, or an empty string if anything goes wrong.
    pub async fn fetch_recent_news(&self, topic: &str) -> String {
        match self.fetch_articles(topic).await {
            Ok(articles) => {
                let digest = format_digest(&articles);
                info!(topic, articles = articles.len(), digest_len = digest.len(), "news digest ready");
                digest
            }
            Err(e) => {
                warn!(topic, error = %e, "news lookup failed, continuing without digest");
                String::new()
            }
        }
    }

    async fn fetch_articles(&self, topic: &str) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", topic),
                ("sortBy", "publishedAt"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::FetchError(format!("news service returned {}", status)));
        }

        let body: NewsResponse = response
            .json()
            .await
            .map_err(|e| AppError::ParseError(format!("invalid news payload: {}", e)))?;

        Ok(body.articles)
    }
}

/// Formats up to [`MAX_ARTICLES`] articles as `**title**: description` lines.
///
/// The cap is applied before articles without a description are dropped, so a
/// digest can hold fewer than five entries even when more articles exist.
pub fn format_digest(articles: &[Article]) -> String {
    articles
        .iter()
        .take(MAX_ARTICLES)
        .filter_map(|article| {
            let description = article.description.as_deref().filter(|d| !d.is_empty())?;
            let title = article.title.as_deref().unwrap_or_default();
            Some(format!("**{}**: {}", title, description))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: Option<&str>) -> Article {
        Article {
            title: Some(title.to_string()),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn empty_input_gives_empty_digest() {
        assert_eq!(format_digest(&[]), "");
    }

    #[test]
    fn formats_title_and_description() {
        let digest = format_digest(&[
            article("Solar record", Some("Output hit a new high.")),
            article("Wind farms", Some("Offshore capacity doubled.")),
        ]);
        assert_eq!(
            digest,
            "**Solar record**: Output hit a new high.\n**Wind farms**: Offshore capacity doubled."
        );
    }

    #[test]
    fn caps_before_filtering() {
        let mut articles = vec![
            article("one", Some("a")),
            article("two", None),
            article("three", Some("")),
            article("four", Some("d")),
            article("five", Some("e")),
        ];
        articles.push(article("six", Some("f")));

        let digest = format_digest(&articles);
        assert_eq!(digest, "**one**: a\n**four**: d\n**five**: e");
        assert!(!digest.contains("six"));
    }

    #[test]
    fn payload_without_articles_parses_as_empty() {
        let body: NewsResponse = serde_json::from_str(r#"{"status":"ok","totalResults":0}"#).unwrap();
        assert!(body.articles.is_empty());
    }

    #[test]
    fn null_fields_are_tolerated() {
        let body: NewsResponse = serde_json::from_str(
            r#"{"articles":[{"title":null,"description":"desc"},{"title":"t","description":null}]}"#,
        )
        .unwrap();
        assert_eq!(format_digest(&body.articles), "****: desc");
    }
}
