pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::Error;
pub use models::ChatModel;
pub use storage::{ReportStorage, SavedReport};
pub use types::{Article, ChatMessage, ChatRole, Report};

pub type Result<T> = std::result::Result<T, Error>;
