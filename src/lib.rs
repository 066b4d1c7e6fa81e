//! # promptkit
//!
//! Configuration-driven prompt rendering and dispatch for LLM clients.
//!
//! ## Overview
//!
//! Prompt templates, model names, provider bindings and temperatures live in
//! an external configuration file. The library loads and validates that file
//! once, renders a prompt with caller-supplied variables, hands the result to
//! whichever [`LlmClient`] is registered for the prompt's provider, and runs
//! observer [`PromptHook`]s around the call.
//!
//! Retries, caching, timeouts and request formatting belong to the client
//! implementations; this crate only orchestrates.
//!
//! ## Quick Start
//!
//! ```rust
//! use async_trait::async_trait;
//! use promptkit::{
//!     ConfigFormat, LlmClient, LlmResponse, ModelConfig, PromptLoader, PromptRunner,
//!     ToolSpecification,
//! };
//! use std::sync::Arc;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl LlmClient for Echo {
//!     fn name(&self) -> &str {
//!         "echo"
//!     }
//!
//!     async fn generate(
//!         &self,
//!         prompt: &str,
//!         _tools: Option<&[ToolSpecification]>,
//!         _model: &ModelConfig,
//!     ) -> promptkit::Result<LlmResponse> {
//!         Ok(LlmResponse::new(prompt))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> promptkit::Result<()> {
//! let loader = PromptLoader::new();
//! loader.load_str(r#"
//! [models]
//! welcome = "gpt-4o-mini"
//! [providers]
//! welcome = "openai"
//! [temperatures]
//! welcome = 0.7
//! [welcome]
//! template = "Hello {name}, welcome to {product}!"
//! "#, ConfigFormat::Toml)?;
//!
//! let runner = PromptRunner::new(loader).with_client("openai", Arc::new(Echo))?;
//! let response = runner
//!     .run("welcome", [("name", "Ada"), ("product", "PromptKit")])
//!     .await?;
//! assert_eq!(response.output, "Hello Ada, welcome to PromptKit!");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Configuration loading, validation and the prompt model |
//! | [`template`] | `{placeholder}` rendering |
//! | [`client`] | The [`LlmClient`] contract and provider registry |
//! | [`runner`] | Run orchestration, request builder and fragment streams |
//! | [`hooks`] | Lifecycle observers and the built-in [`TracingHook`] |
//! | [`types`] | Tool specifications and responses |
//! | [`error`] | Unified [`Error`] type |
//! | [`error_code`] | Stable error classification codes |

pub mod client;
pub mod config;
pub mod error;
pub mod error_code;
pub mod hooks;
pub mod prelude;
pub mod runner;
pub mod template;
pub mod types;

pub use client::{ClientRegistry, LlmClient};
pub use config::{
    ConfigError, ConfigFormat, ModelConfig, PromptConfig, PromptDefinition, PromptLoader,
};
pub use error::{Error, ErrorContext};
pub use error_code::ErrorKind;
pub use hooks::{HookContext, HookManager, PromptHook, TracingHook};
pub use runner::{PromptRequest, PromptRunner, PromptStream};
pub use template::Variables;
pub use types::{LlmResponse, ToolSpecification};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A pinned, boxed stream of fallible items, as produced by clients.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;
