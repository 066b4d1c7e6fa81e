//! # Types Module
//!
//! Data that crosses the client boundary: tool metadata attached to prompts
//! and the normalized response every client returns.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ToolSpecification`] | Descriptive tool metadata (name, schema) |
//! | [`LlmResponse`] | Output text plus optional reasoning trace |
//!
//! ## Example
//!
//! ```rust
//! use promptkit::types::{LlmResponse, ToolSpecification};
//!
//! let tool = ToolSpecification::function("lookup", "Find a record", serde_json::json!({
//!     "type": "object",
//!     "properties": { "id": { "type": "string" } }
//! }));
//! assert_eq!(tool.name, "lookup");
//!
//! let response = LlmResponse::new("done").with_reasoning("looked it up");
//! assert_eq!(response.output, "done");
//! ```

pub mod response;
pub mod tool;

pub use response::LlmResponse;
pub use tool::ToolSpecification;
