//! Provider-keyed client registry.

use super::LlmClient;
use crate::{Error, ErrorContext, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Maps provider names to client instances; the last registration wins.
///
/// Provider keys are trimmed and lowercased on both registration and lookup,
/// so `"OpenAI"` and `"openai "` address the same slot.
#[derive(Clone, Default)]
pub struct ClientRegistry {
    clients: HashMap<String, Arc<dyn LlmClient>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `client` under `provider`, returning the client it replaced.
    ///
    /// A provider that is empty after trimming is rejected; no configured
    /// prompt could ever reach it.
    pub fn register(
        &mut self,
        provider: &str,
        client: Arc<dyn LlmClient>,
    ) -> Result<Option<Arc<dyn LlmClient>>> {
        let key = normalize_provider(provider);
        if key.is_empty() {
            return Err(Error::validation_with_context(
                "provider key must be a non-empty string",
                ErrorContext::new()
                    .with_field_path("provider")
                    .with_details(format!("found {:?}", provider))
                    .with_source("client_registry"),
            ));
        }
        let client_name = client.name().to_string();
        let previous = self.clients.insert(key.clone(), client);
        match &previous {
            Some(old) => info!(
                provider = %key,
                client = %client_name,
                replaced = %old.name(),
                "replaced LLM client"
            ),
            None => debug!(provider = %key, client = %client_name, "registered LLM client"),
        }
        Ok(previous)
    }

    pub fn get(&self, provider: &str) -> Option<Arc<dyn LlmClient>> {
        self.clients.get(&normalize_provider(provider)).cloned()
    }

    pub fn contains(&self, provider: &str) -> bool {
        self.clients.contains_key(&normalize_provider(provider))
    }

    pub fn remove(&mut self, provider: &str) -> Option<Arc<dyn LlmClient>> {
        self.clients.remove(&normalize_provider(provider))
    }

    /// Registered provider keys, sorted.
    pub fn providers(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.clients.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.providers()
                    .into_iter()
                    .filter_map(|p| self.clients.get(p).map(|c| (p, c.name()))),
            )
            .finish()
    }
}

pub(crate) fn normalize_provider(provider: &str) -> String {
    provider.trim().to_lowercase()
}
