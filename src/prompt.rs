use serde::Serialize;

pub const MIN_WORDS: u32 = 100;
pub const MAX_WORDS: u32 = 2000;
pub const WORD_STEP: u32 = 50;

pub const SYSTEM_PROMPT: &str = "You are a helpful blog writing assistant. Your task is to write well-structured blogs using Markdown formatting wherever necessary.";

/// Label of the free-form style option.
pub const CUSTOM_STYLE: &str = "Custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritingStyle {
    Conversational,
    Technical,
    Literary,
    Shakespearean,
    JkRowling,
    ElonMusk,
    Humorous,
    Inspirational,
    Custom,
}

impl WritingStyle {
    /// Every selectable style, in display order.
    pub const ALL: [WritingStyle; 9] = [
        WritingStyle::Conversational,
        WritingStyle::Technical,
        WritingStyle::Literary,
        WritingStyle::Shakespearean,
        WritingStyle::JkRowling,
        WritingStyle::ElonMusk,
        WritingStyle::Humorous,
        WritingStyle::Inspirational,
        WritingStyle::Custom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WritingStyle::Conversational => "Conversational",
            WritingStyle::Technical => "Technical",
            WritingStyle::Literary => "Literary",
            WritingStyle::Shakespearean => "Shakespearean",
            WritingStyle::JkRowling => "J.K. Rowling-style",
            WritingStyle::ElonMusk => "Elon Musk-style",
            WritingStyle::Humorous => "Humorous",
            WritingStyle::Inspirational => "Inspirational",
            WritingStyle::Custom => CUSTOM_STYLE,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.label() == label)
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|style| style.label()).collect()
    }
}

/// Picks the style string that goes into the prompt.
///
/// `Custom` uses the custom text when it has any non-whitespace content and
/// falls back to the literal label otherwise. Any other selection is used as-is.
pub fn effective_style(selected: &str, custom: Option<&str>) -> String {
    if selected == CUSTOM_STYLE {
        match custom {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => CUSTOM_STYLE.to_string(),
        }
    } else {
        selected.to_string()
    }
}

/// Clamps into `[MIN_WORDS, MAX_WORDS]` and snaps to the nearest step.
pub fn normalize_word_count(requested: u32) -> u32 {
    let clamped = requested.clamp(MIN_WORDS, MAX_WORDS);
    let steps = (clamped - MIN_WORDS + WORD_STEP / 2) / WORD_STEP;
    (MIN_WORDS + steps * WORD_STEP).min(MAX_WORDS)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessages {
    pub system: String,
    pub human: String,
}

pub fn compose_prompt(topic: &str, word_count: u32, style: &str, news_digest: &str) -> PromptMessages {
    let human = format!(
        r#"
        "Write a blog post in {style} style about {topic}.
        The post should include an introduction, detailed main content with headers and bullet points,
        and a concise conclusion—all within approximately {word_count} words.
        The blog must distinctly reflect the {style} style throughout its language, tone, and structure.
        Emphasize the unique characteristics of {style} writing.
        Ensure that all terms used are clear, standard English words relevant to the topic and style, avoiding foreign or invented words.
        If relevant, seamlessly integrate the following recent news highlights into the narrative: {news_digest}.
        Use proper Markdown formatting with headers, bullet points, **bold text**, and _italics_ as needed."#
    );

    PromptMessages {
        system: SYSTEM_PROMPT.to_string(),
        human,
    }
}
