pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod logging;
pub mod news;
pub mod prompt;

use std::sync::Arc;
use config::Config;
use generator::BlogGenerator;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: Arc<BlogGenerator>,
}

impl AppState {
    pub fn from_config(config: Config) -> error::Result<Self> {
        let generator = BlogGenerator::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            generator: Arc::new(generator),
        })
    }
}
