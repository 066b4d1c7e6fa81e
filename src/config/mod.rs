//! # Prompt Configuration Layer
//!
//! Loads prompt configuration files, validates them, and exposes the
//! resulting read-only model to the runner.
//!
//! ## Document shape
//!
//! ```toml
//! [models]
//! welcome = "gpt-4o-mini"
//!
//! [providers]
//! welcome = "openai"
//!
//! [temperatures]
//! welcome = 0.7
//!
//! [welcome]
//! template = "Hello {name}, welcome to {product}!"
//! ```
//!
//! The three binding tables are keyed by prompt name; every other top-level
//! table is a prompt. A prompt table needs a non-empty `template` and may set
//! `structured = true` or list `[[welcome.tools]]`. YAML and JSON sources use
//! the same shape.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`loader`] | File and in-memory loading with wholesale replacement |
//! | [`definition`] | Prompt, model and configuration model types |
//! | [`document`] | Cross-reference resolution and field validation |
//! | [`format`] | TOML / YAML / JSON parsing and BOM handling |
//! | [`error`] | Configuration-specific error types |
//!
//! ## Example
//!
//! ```rust
//! use promptkit::config::{ConfigFormat, PromptLoader};
//!
//! let loader = PromptLoader::new();
//! loader.load_str(r#"
//! [models]
//! welcome = "gpt-4o-mini"
//! [providers]
//! welcome = "openai"
//! [temperatures]
//! welcome = 0.7
//! [welcome]
//! template = "Hello {name}!"
//! "#, ConfigFormat::Toml)?;
//!
//! let welcome = loader.get("welcome").expect("loaded above");
//! assert_eq!(welcome.model.provider, "openai");
//! # Ok::<(), promptkit::config::ConfigError>(())
//! ```

pub mod definition;
pub mod document;
pub mod error;
pub mod format;
pub mod loader;

pub use definition::{ModelConfig, PromptConfig, PromptDefinition};
pub use error::ConfigError;
pub use format::ConfigFormat;
pub use loader::{PromptLoader, CONFIG_ENV_VAR};
