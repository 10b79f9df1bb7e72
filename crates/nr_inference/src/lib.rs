pub mod models;

pub use models::{create_model, Config, OllamaModel};

pub mod prelude {
    pub use super::models::create_model;
    pub use super::Config;
    pub use nr_core::{ChatMessage, ChatModel, Error, Result};
}
