//! Per-run request builder.

use super::{PromptRunner, PromptStream};
use crate::client::LlmClient;
use crate::template::Variables;
use crate::types::{LlmResponse, ToolSpecification};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

/// Builder for a single prompt run, created by [`PromptRunner::prompt`].
pub struct PromptRequest<'a> {
    pub(crate) runner: &'a PromptRunner,
    pub(crate) prompt_name: String,
    pub(crate) variables: Variables,
    pub(crate) client: Option<Arc<dyn LlmClient>>,
    pub(crate) tools: Option<Vec<ToolSpecification>>,
}

impl<'a> PromptRequest<'a> {
    pub(crate) fn new(runner: &'a PromptRunner, prompt_name: impl Into<String>) -> Self {
        Self {
            runner,
            prompt_name: prompt_name.into(),
            variables: Variables::new(),
            client: None,
            tools: None,
        }
    }

    /// Set one template variable. A later value for the same key wins.
    pub fn var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Add several template variables.
    pub fn variables<I, K, V>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.variables
            .extend(variables.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Use `client` instead of the one registered for the prompt's provider.
    pub fn client(mut self, client: Arc<dyn LlmClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Replace the prompt's configured tools for this run only.
    pub fn tools(mut self, tools: Vec<ToolSpecification>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn prompt_name(&self) -> &str {
        &self.prompt_name
    }

    /// Run to completion.
    pub async fn execute(self) -> Result<LlmResponse> {
        let runner = self.runner;
        runner.execute(self).await
    }

    /// Run with the client's streaming entry point.
    pub async fn execute_stream(self) -> Result<PromptStream> {
        let runner = self.runner;
        runner.execute_stream(self).await
    }
}

impl std::fmt::Debug for PromptRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRequest")
            .field("prompt_name", &self.prompt_name)
            .field("variables", &self.variables)
            .field("client", &self.client.as_ref().map(|c| c.name().to_string()))
            .field("tools", &self.tools)
            .finish()
    }
}
