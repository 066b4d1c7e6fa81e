//! Client capability interface and provider registry.
//!
//! Provider adapters live outside this crate; they implement [`LlmClient`]
//! and are registered on a runner under a provider name.

pub mod core;
pub mod registry;

pub use core::LlmClient;
pub use registry::ClientRegistry;
