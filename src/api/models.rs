use serde::{Deserialize, Serialize};

use crate::prompt::{WritingStyle, MAX_WORDS, MIN_WORDS, WORD_STEP};

pub use crate::generator::{BlogPost, GenerationRequest};

#[derive(Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Serialize)]
pub struct StylesResponse {
    pub styles: Vec<&'static str>,
    pub min_words: u32,
    pub max_words: u32,
    pub word_step: u32,
    pub news_enabled: bool,
}

impl StylesResponse {
    pub fn new(news_enabled: bool) -> Self {
        Self {
            styles: WritingStyle::labels(),
            min_words: MIN_WORDS,
            max_words: MAX_WORDS,
            word_step: WORD_STEP,
            news_enabled,
        }
    }
}
