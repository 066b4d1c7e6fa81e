//! Shared test clients, hooks and fixture helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::stream;
use promptkit::hooks::{HookContext, PromptHook};
use promptkit::{
    BoxStream, ConfigFormat, Error, LlmClient, LlmResponse, ModelConfig, PromptLoader, Result,
    ToolSpecification,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub async fn fixture_loader() -> Arc<PromptLoader> {
    let loader = PromptLoader::from_path(fixture("prompts.toml"))
        .await
        .expect("fixture config loads");
    Arc::new(loader)
}

pub fn loader_from(toml: &str) -> Arc<PromptLoader> {
    let loader = PromptLoader::new();
    loader
        .load_str(toml, ConfigFormat::Toml)
        .expect("inline config loads");
    Arc::new(loader)
}

/// One `generate` or `stream_generate` call as the client saw it.
#[derive(Debug, Clone)]
pub struct SeenCall {
    pub prompt: String,
    pub tools: Option<Vec<String>>,
    pub model: ModelConfig,
}

#[derive(Default)]
struct CallLog {
    calls: AtomicUsize,
    seen: Mutex<Vec<SeenCall>>,
}

impl CallLog {
    fn record(&self, prompt: &str, tools: Option<&[ToolSpecification]>, model: &ModelConfig) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(SeenCall {
            prompt: prompt.to_string(),
            tools: tools.map(|t| t.iter().map(|spec| spec.name.clone()).collect()),
            model: model.clone(),
        });
    }
}

/// Returns the prompt unchanged. Uses the default single-fragment stream.
pub struct EchoClient {
    name: String,
    log: CallLog,
}

impl EchoClient {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            log: CallLog::default(),
        })
    }

    pub fn calls(&self) -> usize {
        self.log.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<SeenCall> {
        self.log.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmClient for EchoClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        prompt: &str,
        tools: Option<&[ToolSpecification]>,
        model: &ModelConfig,
    ) -> Result<LlmResponse> {
        self.log.record(prompt, tools, model);
        Ok(LlmResponse::new(prompt))
    }
}

/// Echo client that accepts tools and reports which ones it received.
pub struct ToolClient {
    log: CallLog,
}

impl ToolClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            log: CallLog::default(),
        })
    }

    pub fn calls(&self) -> usize {
        self.log.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<SeenCall> {
        self.log.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmClient for ToolClient {
    fn name(&self) -> &str {
        "tool-client"
    }

    fn supports_tools(&self) -> bool {
        true
    }

    async fn generate(
        &self,
        prompt: &str,
        tools: Option<&[ToolSpecification]>,
        model: &ModelConfig,
    ) -> Result<LlmResponse> {
        self.log.record(prompt, tools, model);
        Ok(LlmResponse::new(prompt).with_reasoning("used tools"))
    }
}

/// Every call fails with a client error.
pub struct FailingClient {
    log: CallLog,
}

impl FailingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            log: CallLog::default(),
        })
    }

    pub fn calls(&self) -> usize {
        self.log.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for FailingClient {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(
        &self,
        prompt: &str,
        tools: Option<&[ToolSpecification]>,
        model: &ModelConfig,
    ) -> Result<LlmResponse> {
        self.log.record(prompt, tools, model);
        Err(Error::client("upstream unavailable"))
    }
}

/// Streams the prompt back in fixed-size character chunks, optionally
/// failing after a number of fragments.
pub struct ChunkedClient {
    chunk: usize,
    fail_after: Option<usize>,
    log: CallLog,
}

impl ChunkedClient {
    pub fn new(chunk: usize) -> Arc<Self> {
        Arc::new(Self {
            chunk: chunk.max(1),
            fail_after: None,
            log: CallLog::default(),
        })
    }

    pub fn failing_after(chunk: usize, fragments: usize) -> Arc<Self> {
        Arc::new(Self {
            chunk: chunk.max(1),
            fail_after: Some(fragments),
            log: CallLog::default(),
        })
    }

    pub fn calls(&self) -> usize {
        self.log.calls.load(Ordering::SeqCst)
    }

    fn chunks(&self, prompt: &str) -> Vec<String> {
        let chars: Vec<char> = prompt.chars().collect();
        chars
            .chunks(self.chunk)
            .map(|c| c.iter().collect())
            .collect()
    }
}

#[async_trait]
impl LlmClient for ChunkedClient {
    fn name(&self) -> &str {
        "chunked"
    }

    async fn generate(
        &self,
        prompt: &str,
        tools: Option<&[ToolSpecification]>,
        model: &ModelConfig,
    ) -> Result<LlmResponse> {
        self.log.record(prompt, tools, model);
        Ok(LlmResponse::new(prompt))
    }

    async fn stream_generate(
        &self,
        prompt: &str,
        tools: Option<&[ToolSpecification]>,
        model: &ModelConfig,
    ) -> Result<BoxStream<'static, String>> {
        self.log.record(prompt, tools, model);
        let mut items: Vec<Result<String>> = self.chunks(prompt).into_iter().map(Ok).collect();
        if let Some(n) = self.fail_after {
            items.truncate(n);
            items.push(Err(Error::client("stream interrupted")));
        }
        Ok(Box::pin(stream::iter(items)))
    }
}

pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Before,
    After,
}

/// Writes `<name>:before`, `<name>:after:<output>` and `<name>:error:<code>`
/// into a shared log.
pub struct RecordingHook {
    name: String,
    log: EventLog,
    fail_in: Option<Phase>,
    suffix: Option<String>,
}

impl RecordingHook {
    pub fn new(name: &str, log: &EventLog) -> Self {
        Self {
            name: name.to_string(),
            log: Arc::clone(log),
            fail_in: None,
            suffix: None,
        }
    }

    pub fn failing_in(mut self, phase: Phase) -> Self {
        self.fail_in = Some(phase);
        self
    }

    /// Append `suffix` to the outgoing prompt in `before_run`.
    pub fn appending(mut self, suffix: &str) -> Self {
        self.suffix = Some(suffix.to_string());
        self
    }

    pub fn shared(self) -> Arc<dyn PromptHook> {
        Arc::new(self)
    }

    fn push(&self, event: String) {
        self.log.lock().unwrap().push(event);
    }
}

#[async_trait]
impl PromptHook for RecordingHook {
    fn name(&self) -> &str {
        &self.name
    }

    async fn before_run(&self, ctx: &mut HookContext) -> Result<()> {
        self.push(format!("{}:before", self.name));
        if self.fail_in == Some(Phase::Before) {
            return Err(Error::hook("", "refused before run"));
        }
        if let Some(suffix) = &self.suffix {
            ctx.rendered_prompt.push_str(suffix);
        }
        Ok(())
    }

    async fn after_run(&self, _ctx: &HookContext, response: &LlmResponse) -> Result<()> {
        self.push(format!("{}:after:{}", self.name, response.output));
        if self.fail_in == Some(Phase::After) {
            return Err(Error::hook("", "refused after run"));
        }
        Ok(())
    }

    async fn on_error(&self, _ctx: &HookContext, error: &Error) {
        self.push(format!("{}:error:{}", self.name, error.kind().code()));
    }
}
