use async_trait::async_trait;

use crate::config::CompletionOptions;
use crate::errors::FactCheckResult;

/// A text-completion service backed by a large language model
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a prompt and return the model's single text completion.
    /// An empty completion is an error.
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> FactCheckResult<String>;

    /// Identifier of the model that answers the prompts
    fn model_name(&self) -> String;
}
