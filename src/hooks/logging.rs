//! Hook that reports the run lifecycle through `tracing`.

use super::{HookContext, PromptHook};
use crate::types::LlmResponse;
use crate::{Error, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Logs run start, completion and failure.
///
/// Rendered prompts and outputs are only logged at `debug`, and only when
/// [`TracingHook::with_payloads`] is enabled.
#[derive(Debug, Clone, Default)]
pub struct TracingHook {
    log_payloads: bool,
}

impl TracingHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payloads(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }
}

#[async_trait]
impl PromptHook for TracingHook {
    fn name(&self) -> &str {
        "tracing"
    }

    async fn before_run(&self, ctx: &mut HookContext) -> Result<()> {
        info!(
            run_id = %ctx.run_id,
            prompt = %ctx.prompt_name,
            provider = ctx.provider().unwrap_or("-"),
            streaming = ctx.streaming,
            tools = ctx.tools.len(),
            "prompt run started"
        );
        if self.log_payloads {
            debug!(run_id = %ctx.run_id, prompt_text = %ctx.rendered_prompt, "rendered prompt");
        }
        Ok(())
    }

    async fn after_run(&self, ctx: &HookContext, response: &LlmResponse) -> Result<()> {
        info!(
            run_id = %ctx.run_id,
            prompt = %ctx.prompt_name,
            elapsed_ms = ctx.elapsed().as_millis() as u64,
            output_chars = response.output.chars().count(),
            has_reasoning = response.reasoning.is_some(),
            "prompt run finished"
        );
        if self.log_payloads {
            debug!(run_id = %ctx.run_id, output = %response.output, "prompt output");
        }
        Ok(())
    }

    async fn on_error(&self, ctx: &HookContext, error: &Error) {
        warn!(
            run_id = %ctx.run_id,
            prompt = %ctx.prompt_name,
            code = error.kind().code(),
            elapsed_ms = ctx.elapsed().as_millis() as u64,
            "prompt run failed: {}",
            error
        );
    }
}
