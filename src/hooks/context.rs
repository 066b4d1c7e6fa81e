//! Per-run context shared with hooks.

use crate::config::ModelConfig;
use crate::types::ToolSpecification;
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// What hooks see of a run.
///
/// Fields fill in as the run progresses: a run that fails on an unknown
/// prompt name reaches `on_error` with only `run_id` and `prompt_name` set.
#[derive(Debug, Clone)]
pub struct HookContext {
    pub run_id: String,
    pub prompt_name: String,
    pub model: Option<ModelConfig>,
    /// Supplied variables in their rendered text form.
    pub variables: BTreeMap<String, String>,
    /// Prompt text sent to the client. `before_run` may rewrite it.
    pub rendered_prompt: String,
    pub tools: Vec<ToolSpecification>,
    pub streaming: bool,
    /// Free-form values hooks pass between lifecycle calls.
    pub metadata: HashMap<String, serde_json::Value>,
    started_at: Instant,
}

impl HookContext {
    pub fn new(prompt_name: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            prompt_name: prompt_name.into(),
            model: None,
            variables: BTreeMap::new(),
            rendered_prompt: String::new(),
            tools: Vec::new(),
            streaming: false,
            metadata: HashMap::new(),
            started_at: Instant::now(),
        }
    }

    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub fn provider(&self) -> Option<&str> {
        self.model.as_ref().map(|m| m.provider.as_str())
    }

    /// True once the template has been rendered.
    pub fn is_rendered(&self) -> bool {
        self.model.is_some() && !self.rendered_prompt.is_empty()
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata.insert(key.into(), value);
    }

    pub fn metadata(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }

    /// Time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
