use crate::config::ConfigError;
use crate::error_code::ErrorKind;
use thiserror::Error;

/// Structured error context for configuration and validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "welcome.template")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "prompt_loader", "run_validator")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for prompt loading, rendering and dispatch.
///
/// Every failure a run can produce maps onto one of these variants; hooks
/// receive the same value through `on_error` before it reaches the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Prompt not found: {name}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    NotFound { name: String, hint: Option<String> },

    #[error("Rendering error in prompt '{prompt}': no value supplied for {}", format_missing(.missing))]
    Render { prompt: String, missing: Vec<String> },

    #[error("No LLM client registered for provider '{provider}'")]
    ClientNotRegistered { provider: String },

    #[error("Client '{client}' does not support tools ({tools} attached to prompt '{prompt}')")]
    Capability {
        client: String,
        prompt: String,
        tools: usize,
    },

    #[error("Client error: {message}")]
    Client {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Hook '{hook}' failed: {message}")]
    Hook { hook: String, message: String },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },
}

fn format_missing(missing: &[String]) -> String {
    missing
        .iter()
        .map(|name| format!("{{{}}}", name))
        .collect::<Vec<_>>()
        .join(", ")
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Opaque client failure with a message only.
    pub fn client(message: impl Into<String>) -> Self {
        Error::Client {
            message: message.into(),
            source: None,
        }
    }

    /// Opaque client failure wrapping the adapter's own error.
    pub fn client_from<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Client {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Error a hook returns to veto a run. The hook manager fills in the
    /// registered hook name, so `hook` may be left empty.
    pub fn hook(hook: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Hook {
            hook: hook.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Stable classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Configuration,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Render { .. } => ErrorKind::Rendering,
            Error::ClientNotRegistered { .. } => ErrorKind::ClientNotRegistered,
            Error::Capability { .. } => ErrorKind::Capability,
            Error::Client { .. } => ErrorKind::Client,
            Error::Hook { .. } => ErrorKind::Hook,
            Error::Validation { .. } => ErrorKind::Validation,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Validation { context, .. } => Some(context),
            _ => None,
        }
    }
}
