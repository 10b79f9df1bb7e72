use std::sync::Arc;

use nr_core::{ChatModel, Result};

pub mod ollama;

pub use ollama::OllamaModel;

/// Model client configuration, filled from CLI flags or environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub model_name: Option<String>,
    pub base_url: Option<String>,
}

/// Build the configured chat model client.
pub fn create_model(config: Config) -> Result<Arc<dyn ChatModel>> {
    let model = OllamaModel::new(config.model_name, config.base_url);
    Ok(Arc::new(model))
}
