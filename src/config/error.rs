//! Configuration error types

use super::format::ConfigFormat;

/// Errors raised while reading or validating a prompt configuration source.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load prompt configuration from {path}: {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    LoadError {
        path: String,
        reason: String,
        hint: Option<String>,
    },

    #[error("{format} syntax error: {message}")]
    Syntax {
        format: ConfigFormat,
        message: String,
    },

    #[error("Missing required field '{field}'{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    MissingField { field: String, hint: Option<String> },

    #[error("Invalid value at '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Prompt '{prompt}' is referenced by '{referenced_by}' but has no table of its own{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    UndefinedPrompt {
        prompt: String,
        referenced_by: String,
        hint: Option<String>,
    },
}

impl ConfigError {
    /// Attach an actionable hint to the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint_val = Some(hint.into());
        match self {
            ConfigError::LoadError { ref mut hint, .. } => *hint = hint_val,
            ConfigError::MissingField { ref mut hint, .. } => *hint = hint_val,
            ConfigError::UndefinedPrompt { ref mut hint, .. } => *hint = hint_val,
            _ => (),
        }
        self
    }

    /// Dotted path of the offending field, when the error concerns one.
    pub fn field_path(&self) -> Option<&str> {
        match self {
            ConfigError::MissingField { field, .. } | ConfigError::InvalidValue { field, .. } => {
                Some(field)
            }
            ConfigError::UndefinedPrompt { prompt, .. } => Some(prompt),
            _ => None,
        }
    }
}
