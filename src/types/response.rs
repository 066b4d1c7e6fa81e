//! Normalized client response.

use serde::{Deserialize, Serialize};

/// What a client returns for one prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmResponse {
    pub output: String,
    /// Reasoning trace, for models that expose one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl LlmResponse {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            reasoning: None,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }
}

impl From<String> for LlmResponse {
    fn from(output: String) -> Self {
        Self::new(output)
    }
}
