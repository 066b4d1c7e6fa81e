//! Minimal prelude for application code.
//!
//! Covers what a typical caller touches: loading, running, and implementing
//! clients or hooks.

pub use crate::client::LlmClient;
pub use crate::config::{ConfigFormat, ModelConfig, PromptLoader};
pub use crate::hooks::{HookContext, PromptHook, TracingHook};
pub use crate::runner::{PromptRunner, PromptStream};
pub use crate::types::{LlmResponse, ToolSpecification};
pub use crate::{Error, Result};
