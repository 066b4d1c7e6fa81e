//! # Hook System
//!
//! Observers attached to the run lifecycle. A hook implements any subset of
//! [`PromptHook::before_run`], [`PromptHook::after_run`] and
//! [`PromptHook::on_error`]; the rest default to no-ops.
//!
//! ## Ordering and failure policy
//!
//! - Hooks run in registration order for every phase.
//! - `before_run` gets `&mut HookContext` and may rewrite
//!   `rendered_prompt`; the runner sends whatever text is left after the last
//!   hook. Returning an error vetoes the run.
//! - An error from `before_run` or `after_run` stops the remaining hooks of
//!   that phase and fails the run with [`Error::Hook`]. Every other hook then
//!   receives `on_error`; the failing hook does not.
//! - `on_error` fires exactly once per hook per failed run and cannot
//!   suppress the error.
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use promptkit::hooks::{HookContext, PromptHook};
//! use promptkit::{Error, Result};
//!
//! struct Signature;
//!
//! #[async_trait]
//! impl PromptHook for Signature {
//!     fn name(&self) -> &str {
//!         "signature"
//!     }
//!
//!     async fn before_run(&self, ctx: &mut HookContext) -> Result<()> {
//!         if ctx.rendered_prompt.len() > 8_000 {
//!             return Err(Error::hook(self.name(), "prompt too long"));
//!         }
//!         ctx.rendered_prompt.push_str("\n-- sent via promptkit");
//!         Ok(())
//!     }
//! }
//! ```

mod context;
mod logging;
mod manager;

pub use context::HookContext;
pub use logging::TracingHook;
pub use manager::{HookFailure, HookManager};

use crate::types::LlmResponse;
use crate::{Error, Result};
use async_trait::async_trait;

/// Observer for prompt runs.
#[async_trait]
pub trait PromptHook: Send + Sync {
    /// Name reported in [`Error::Hook`] when this hook fails.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn before_run(&self, _ctx: &mut HookContext) -> Result<()> {
        Ok(())
    }

    async fn after_run(&self, _ctx: &HookContext, _response: &LlmResponse) -> Result<()> {
        Ok(())
    }

    async fn on_error(&self, _ctx: &HookContext, _error: &Error) {}
}
