//! Ordered hook dispatch.

use super::{HookContext, PromptHook};
use crate::types::LlmResponse;
use crate::Error;
use std::fmt;
use std::sync::Arc;

/// A hook that failed during `before_run` or `after_run`.
#[derive(Debug)]
pub struct HookFailure {
    /// Registration index of the failing hook.
    pub index: usize,
    /// Always an [`Error::Hook`] naming the failing hook.
    pub error: Error,
}

impl HookFailure {
    fn new(index: usize, hook: &dyn PromptHook, error: Error) -> Self {
        let message = match error {
            Error::Hook { message, .. } => message,
            other => other.to_string(),
        };
        Self {
            index,
            error: Error::Hook {
                hook: hook.name().to_string(),
                message,
            },
        }
    }
}

/// Hooks in registration order. An empty manager means "no hooks".
#[derive(Clone, Default)]
pub struct HookManager {
    hooks: Vec<Arc<dyn PromptHook>>,
}

impl HookManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Arc<dyn PromptHook>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    /// Run every `before_run` in order, stopping at the first failure.
    pub async fn before_run(&self, ctx: &mut HookContext) -> Result<(), HookFailure> {
        for (index, hook) in self.hooks.iter().enumerate() {
            if let Err(err) = hook.before_run(ctx).await {
                return Err(HookFailure::new(index, hook.as_ref(), err));
            }
        }
        Ok(())
    }

    /// Run every `after_run` in order, stopping at the first failure.
    pub async fn after_run(
        &self,
        ctx: &HookContext,
        response: &LlmResponse,
    ) -> Result<(), HookFailure> {
        for (index, hook) in self.hooks.iter().enumerate() {
            if let Err(err) = hook.after_run(ctx, response).await {
                return Err(HookFailure::new(index, hook.as_ref(), err));
            }
        }
        Ok(())
    }

    /// Notify every hook of `error`, skipping the hook at `skip` (the one
    /// that raised it, if any).
    pub async fn on_error(&self, ctx: &HookContext, error: &Error, skip: Option<usize>) {
        for (index, hook) in self.hooks.iter().enumerate() {
            if Some(index) == skip {
                continue;
            }
            hook.on_error(ctx, error).await;
        }
    }
}

impl fmt::Debug for HookManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
