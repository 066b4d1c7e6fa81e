//! Pre-dispatch checks: streaming eligibility and tool capability.

use crate::client::LlmClient;
use crate::config::PromptDefinition;
use crate::types::ToolSpecification;
use crate::{Error, ErrorContext, Result};

/// Structured prompts produce a single parsed payload and cannot be streamed.
pub(crate) fn validate_streaming(definition: &PromptDefinition) -> Result<()> {
    if definition.model.structured {
        return Err(Error::validation_with_context(
            format!(
                "prompt '{}' is structured and cannot be streamed; use run instead",
                definition.name
            ),
            ErrorContext::new()
                .with_field_path(format!("{}.structured", definition.name))
                .with_details("expected structured = false for streaming, found true")
                .with_source("run_validator"),
        ));
    }
    Ok(())
}

/// Pick the tools for this run and check the client can take them.
///
/// A per-run override replaces the configured list, even when empty.
pub(crate) fn resolve_tools(
    definition: &PromptDefinition,
    client: &dyn LlmClient,
    override_tools: Option<Vec<ToolSpecification>>,
) -> Result<Vec<ToolSpecification>> {
    let tools = override_tools.unwrap_or_else(|| definition.tools.clone());

    if !tools.is_empty() && !client.supports_tools() {
        return Err(Error::Capability {
            client: client.name().to_string(),
            prompt: definition.name.clone(),
            tools: tools.len(),
        });
    }
    Ok(tools)
}
