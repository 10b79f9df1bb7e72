use async_trait::async_trait;
use crate::types::ChatMessage;
use crate::Result;

/// Chat-style model client. One blocking request per call; no
/// streaming, no automatic retry.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the name of the model backend
    fn name(&self) -> &str;

    /// Send an ordered message exchange and return the text payload
    async fn invoke(&self, messages: &[ChatMessage]) -> Result<String>;
}
