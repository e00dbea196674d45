use chrono::{DateTime, Utc};
use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::llm::CompletionClient;
use crate::news::NewsClient;
use crate::prompt::{compose_prompt, effective_style, normalize_word_count, MIN_WORDS};

pub const DOWNLOAD_FILE_NAME: &str = "blog_post.md";
pub const DOWNLOAD_MIME_TYPE: &str = "text/markdown";
pub const BLANK_TOPIC_MESSAGE: &str = "Please enter a blog topic.";

fn default_word_count() -> u32 {
    MIN_WORDS
}

fn default_style() -> String {
    "Conversational".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default = "default_word_count")]
    pub word_count: u32,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default)]
    pub custom_style: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadInfo {
    pub file_name: &'static str,
    pub mime_type: &'static str,
}

impl Default for DownloadInfo {
    fn default() -> Self {
        Self {
            file_name: DOWNLOAD_FILE_NAME,
            mime_type: DOWNLOAD_MIME_TYPE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    pub topic: String,
    pub word_count: u32,
    pub style: String,
    #[serde(rename = "content_markdown")]
    pub content: String,
    #[serde(rename = "content_html")]
    pub html: String,
    pub news_included: bool,
    pub generated_words: usize,
    pub generated_at: DateTime<Utc>,
    pub download: DownloadInfo,
}

/// Runs news lookup, prompt composition and completion for one request.
pub struct BlogGenerator {
    news: Option<NewsClient>,
    completion: CompletionClient,
}

impl BlogGenerator {
    pub fn new(news: Option<NewsClient>, completion: CompletionClient) -> Self {
        Self { news, completion }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let news = config
            .news_api_key
            .as_deref()
            .map(|key| NewsClient::new(&config.news_api_url, key, config.news_timeout))
            .transpose()?;
        let completion = CompletionClient::new(
            &config.groq_api_url,
            &config.groq_api_key,
            &config.groq_model,
            config.llm_timeout,
        )?;
        Ok(Self::new(news, completion))
    }

    pub fn news_enabled(&self) -> bool {
        self.news.is_some()
    }

    pub async fn generate(&self, req: &GenerationRequest) -> Result<BlogPost> {
        if req.topic.trim().is_empty() {
            return Err(AppError::ValidationError(BLANK_TOPIC_MESSAGE.to_string()));
        }

        let style = effective_style(&req.style, req.custom_style.as_deref());
        let word_count = normalize_word_count(req.word_count);
        info!(topic = %req.topic, word_count, style = %style, "generating blog");

        let news_digest = match &self.news {
            Some(news) => news.fetch_recent_news(&req.topic).await,
            None => String::new(),
        };

        let prompt = compose_prompt(&req.topic, word_count, &style, &news_digest);

        let started = Instant::now();
        let content = match self.completion.generate(&prompt).await {
            Ok(content) => {
                info!(model = self.completion.model(), elapsed = ?started.elapsed(), "completion finished");
                content
            }
            Err(e) => {
                error!(model = self.completion.model(), elapsed = ?started.elapsed(), error = %e, "completion failed");
                return Err(e);
            }
        };

        Ok(BlogPost {
            topic: req.topic.clone(),
            word_count,
            style,
            html: render_markdown(&content),
            generated_words: content.split_whitespace().count(),
            content,
            news_included: !news_digest.is_empty(),
            generated_at: Utc::now(),
            download: DownloadInfo::default(),
        })
    }
}

/// Renders Markdown to HTML. Raw HTML in the source is escaped, not passed through.
///
/// Links and images whose destination is not http, https, mailto or relative
/// lose their tag; their text is still rendered.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;

    // One entry per open link/image: `true` when its tags were dropped.
    let mut links: Vec<bool> = Vec::new();
    let mut images: Vec<bool> = Vec::new();

    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link { ref dest_url, .. }) => {
            let dropped = !is_safe_url(dest_url);
            links.push(dropped);
            (!dropped).then_some(event)
        }
        Event::Start(Tag::Image { ref dest_url, .. }) => {
            let dropped = !is_safe_url(dest_url);
            images.push(dropped);
            (!dropped).then_some(event)
        }
        Event::End(TagEnd::Link) => (!links.pop().unwrap_or(false)).then_some(event),
        Event::End(TagEnd::Image) => (!images.pop().unwrap_or(false)).then_some(event),
        other => Some(other),
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn is_safe_url(url: &str) -> bool {
    // Browsers ignore whitespace and control characters inside a scheme.
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();

    match cleaned.find(|c| matches!(c, ':' | '/' | '?' | '#')) {
        Some(idx) if cleaned[idx..].starts_with(':') => {
            let scheme = cleaned[..idx].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto")
        }
        _ => true,
    }
}
