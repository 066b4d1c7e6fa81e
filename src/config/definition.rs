//! In-memory configuration model.

use crate::template::{normalize_variables, Template, Variables};
use crate::types::ToolSpecification;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Model binding for a prompt, resolved from the `models`, `providers` and
/// `temperatures` tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub provider: String,
    pub temperature: f64,
    /// Prompt output is structured; such prompts cannot be streamed.
    #[serde(default)]
    pub structured: bool,
}

impl ModelConfig {
    pub fn new(name: impl Into<String>, provider: impl Into<String>, temperature: f64) -> Self {
        Self {
            name: name.into(),
            provider: provider.into(),
            temperature,
            structured: false,
        }
    }

    pub fn structured(mut self, structured: bool) -> Self {
        self.structured = structured;
        self
    }
}

/// One fully resolved prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDefinition {
    pub name: String,
    pub template: String,
    pub model: ModelConfig,
    #[serde(default)]
    pub tools: Vec<ToolSpecification>,
}

impl PromptDefinition {
    pub fn new(name: impl Into<String>, template: impl Into<String>, model: ModelConfig) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            model,
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolSpecification>) -> Self {
        self.tools = tools;
        self
    }

    pub fn has_tools(&self) -> bool {
        !self.tools.is_empty()
    }

    /// Placeholder names used by the template.
    pub fn placeholders(&self) -> Vec<&str> {
        Template::new(&self.template).placeholders()
    }

    /// Render the template with `variables`.
    pub fn render(&self, variables: &Variables) -> Result<String> {
        Template::new(&self.template)
            .render(variables)
            .map_err(|missing| Error::Render {
                prompt: self.name.clone(),
                missing: missing.0,
            })
    }

    /// Render and also return the text form of the supplied variables.
    pub fn render_with(&self, variables: &Variables) -> Result<(String, BTreeMap<String, String>)> {
        let rendered = self.render(variables)?;
        Ok((rendered, normalize_variables(variables)))
    }
}

/// Immutable snapshot of every prompt from one configuration source.
#[derive(Debug, Clone, Default)]
pub struct PromptConfig {
    prompts: BTreeMap<String, Arc<PromptDefinition>>,
}

impl PromptConfig {
    pub fn new(definitions: impl IntoIterator<Item = PromptDefinition>) -> Self {
        Self {
            prompts: definitions
                .into_iter()
                .map(|d| (d.name.clone(), Arc::new(d)))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<PromptDefinition>> {
        self.prompts.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.prompts.contains_key(name)
    }

    /// Prompt names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.prompts.keys().map(|k| k.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PromptDefinition> {
        self.prompts.values().map(|d| d.as_ref())
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}
