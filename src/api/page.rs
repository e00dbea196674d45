use once_cell::sync::Lazy;

use crate::error::GENERATION_FAILED_MESSAGE;
use crate::generator::{BLANK_TOPIC_MESSAGE, DOWNLOAD_FILE_NAME, DOWNLOAD_MIME_TYPE};
use crate::prompt::{WritingStyle, CUSTOM_STYLE, MAX_WORDS, MIN_WORDS, WORD_STEP};

const TEMPLATE: &str = include_str!("index.html");

// Rendered once; nothing in it depends on the request.
static INDEX_PAGE: Lazy<String> = Lazy::new(render_index);

pub fn index_page() -> &'static str {
    &INDEX_PAGE
}

fn render_index() -> String {
    let options = WritingStyle::ALL
        .iter()
        .map(|style| format!("      <option value=\"{0}\">{0}</option>", style.label()))
        .collect::<Vec<_>>()
        .join("\n");

    TEMPLATE
        .replace("{{STYLE_OPTIONS}}", &options)
        .replace("{{MIN_WORDS}}", &MIN_WORDS.to_string())
        .replace("{{MAX_WORDS}}", &MAX_WORDS.to_string())
        .replace("{{WORD_STEP}}", &WORD_STEP.to_string())
        .replace("{{CUSTOM_STYLE}}", CUSTOM_STYLE)
        .replace("{{BLANK_TOPIC_MESSAGE}}", BLANK_TOPIC_MESSAGE)
        .replace("{{GENERATION_FAILED_MESSAGE}}", GENERATION_FAILED_MESSAGE)
        .replace("{{DOWNLOAD_FILE_NAME}}", DOWNLOAD_FILE_NAME)
        .replace("{{DOWNLOAD_MIME_TYPE}}", DOWNLOAD_MIME_TYPE)
}
