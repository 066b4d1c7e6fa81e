use crate::config::ModelConfig;
use crate::types::{LlmResponse, ToolSpecification};
use crate::{BoxStream, Result};
use async_trait::async_trait;

/// Contract every LLM provider adapter satisfies.
///
/// Retries, timeouts, caching and request formatting are the adapter's
/// business; the runner only renders, validates and dispatches.
///
/// `model` carries the prompt's configured model name, provider and
/// temperature so one adapter can serve several prompts.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Name used in logs and capability errors (e.g. "openai/gpt-4o").
    fn name(&self) -> &str;

    /// Whether the client can accept tool specifications.
    fn supports_tools(&self) -> bool {
        false
    }

    /// Complete `prompt` in one call.
    async fn generate(
        &self,
        prompt: &str,
        tools: Option<&[ToolSpecification]>,
        model: &ModelConfig,
    ) -> Result<LlmResponse>;

    /// Produce the completion as a finite stream of text fragments.
    ///
    /// The default yields `generate`'s output as a single fragment, which
    /// suits clients without a native streaming transport.
    async fn stream_generate(
        &self,
        prompt: &str,
        tools: Option<&[ToolSpecification]>,
        model: &ModelConfig,
    ) -> Result<BoxStream<'static, String>> {
        let response = self.generate(prompt, tools, model).await?;
        Ok(Box::pin(futures::stream::once(async move {
            Ok(response.output)
        })))
    }
}
