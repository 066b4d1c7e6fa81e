//! Stable error codes for PromptKit failures.
//!
//! Each [`crate::Error`] variant maps onto one [`ErrorKind`]. Hooks and log
//! pipelines can key on the code string instead of matching enum variants.
//!
//! ## Error Code Categories
//!
//! | Prefix | Category | Description                               |
//! |--------|----------|-------------------------------------------|
//! | PK1xxx | load     | Configuration source and prompt lookup    |
//! | PK2xxx | request  | Rendering and per-run validation          |
//! | PK3xxx | dispatch | Client resolution, capabilities, clients  |
//! | PK4xxx | hook     | Failures raised by registered hooks       |
//!
//! ## Example
//!
//! ```rust
//! use promptkit::error_code::ErrorKind;
//!
//! let kind = ErrorKind::Rendering;
//! assert_eq!(kind.code(), "PK2001");
//! assert_eq!(kind.category(), "request");
//! ```

use std::fmt;

/// Classification of a PromptKit error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// PK1001: Malformed or unreadable source, or missing required fields
    Configuration,
    /// PK1002: Unknown prompt name
    NotFound,
    /// PK2001: Template placeholder without a supplied value
    Rendering,
    /// PK2002: Request rejected before dispatch (e.g. streaming a structured prompt)
    Validation,
    /// PK3001: No client for the prompt's provider and no override given
    ClientNotRegistered,
    /// PK3002: Tools attached but the client cannot use them
    Capability,
    /// PK3003: Opaque failure surfaced by the client implementation
    Client,
    /// PK4001: A hook failed or vetoed the run
    Hook,
}

impl ErrorKind {
    /// Returns the canonical code string (e.g., `"PK1001"`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration => "PK1001",
            Self::NotFound => "PK1002",
            Self::Rendering => "PK2001",
            Self::Validation => "PK2002",
            Self::ClientNotRegistered => "PK3001",
            Self::Capability => "PK3002",
            Self::Client => "PK3003",
            Self::Hook => "PK4001",
        }
    }

    /// Returns the snake_case name (e.g., `"client_not_registered"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::NotFound => "not_found",
            Self::Rendering => "rendering",
            Self::Validation => "validation",
            Self::ClientNotRegistered => "client_not_registered",
            Self::Capability => "capability",
            Self::Client => "client",
            Self::Hook => "hook",
        }
    }

    /// Returns the category: `"load"`, `"request"`, `"dispatch"`, or `"hook"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration | Self::NotFound => "load",
            Self::Rendering | Self::Validation => "request",
            Self::ClientNotRegistered | Self::Capability | Self::Client => "dispatch",
            Self::Hook => "hook",
        }
    }

    /// Whether the failure happened before any client was invoked.
    #[inline]
    pub fn before_dispatch(&self) -> bool {
        !matches!(self, Self::Client | Self::Hook)
    }

    /// Parses a snake_case name back into a kind.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "configuration" => Self::Configuration,
            "not_found" => Self::NotFound,
            "rendering" => Self::Rendering,
            "validation" => Self::Validation,
            "client_not_registered" => Self::ClientNotRegistered,
            "capability" => Self::Capability,
            "client" => Self::Client,
            "hook" => Self::Hook,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
