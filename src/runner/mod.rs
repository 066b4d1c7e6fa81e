//! # Prompt Runner
//!
//! Binds variables into a prompt template, picks a client, and dispatches the
//! call with hooks around it.
//!
//! A run goes through these steps; a failure at any of them is reported to
//! every hook's `on_error` and returned to the caller:
//!
//! 1. look up the prompt definition ([`Error::NotFound`]);
//! 2. for streaming runs, reject structured prompts ([`Error::Validation`]);
//! 3. render the template ([`Error::Render`]), before any client is touched;
//! 4. resolve the client from the per-run override or the registry
//!    ([`Error::ClientNotRegistered`]);
//! 5. check tool support ([`Error::Capability`]);
//! 6. `before_run` hooks, then the client call, then `after_run` hooks.
//!
//! ```rust,no_run
//! use promptkit::{PromptLoader, PromptRunner};
//! use std::sync::Arc;
//!
//! # async fn demo(client: Arc<dyn promptkit::LlmClient>) -> promptkit::Result<()> {
//! let loader = PromptLoader::from_path("prompts.toml").await?;
//! let mut runner = PromptRunner::new(loader);
//! runner.register_client("openai", client)?;
//!
//! let response = runner
//!     .prompt("welcome")
//!     .var("name", "Ada")
//!     .var("product", "PromptKit")
//!     .execute()
//!     .await?;
//! println!("{}", response.output);
//! # Ok(())
//! # }
//! ```

mod request;
mod stream;
mod validation;

pub use request::PromptRequest;
pub use stream::PromptStream;

use crate::client::{ClientRegistry, LlmClient};
use crate::config::{ModelConfig, PromptLoader};
use crate::hooks::{HookContext, HookManager, PromptHook};
use crate::types::{LlmResponse, ToolSpecification};
use crate::{Error, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use validation::{resolve_tools, validate_streaming};

/// Everything resolved before hooks and the client are invoked.
struct ExecutionPlan {
    client: Arc<dyn LlmClient>,
    model: ModelConfig,
    tools: Vec<ToolSpecification>,
}

impl ExecutionPlan {
    fn tools(&self) -> Option<&[ToolSpecification]> {
        if self.tools.is_empty() {
            None
        } else {
            Some(&self.tools)
        }
    }
}

/// Renders prompts from a [`PromptLoader`] and dispatches them to clients.
///
/// Registration takes `&mut self`; configure clients and hooks before
/// sharing the runner.
#[derive(Debug)]
pub struct PromptRunner {
    loader: Arc<PromptLoader>,
    clients: ClientRegistry,
    hooks: Arc<HookManager>,
}

impl PromptRunner {
    pub fn new(loader: impl Into<Arc<PromptLoader>>) -> Self {
        Self {
            loader: loader.into(),
            clients: ClientRegistry::new(),
            hooks: Arc::new(HookManager::new()),
        }
    }

    pub fn with_client(mut self, provider: &str, client: Arc<dyn LlmClient>) -> Result<Self> {
        self.register_client(provider, client)?;
        Ok(self)
    }

    pub fn with_hook(mut self, hook: Arc<dyn PromptHook>) -> Self {
        self.add_hook(hook);
        self
    }

    /// Store `client` for `provider`; the last registration wins and the
    /// replaced client is returned. Blank provider keys are rejected with
    /// [`Error::Validation`].
    pub fn register_client(
        &mut self,
        provider: &str,
        client: Arc<dyn LlmClient>,
    ) -> Result<Option<Arc<dyn LlmClient>>> {
        self.clients.register(provider, client)
    }

    /// Append a hook. Hooks run in the order they were added.
    pub fn add_hook(&mut self, hook: Arc<dyn PromptHook>) {
        // Streams still in flight keep the hook list they started with.
        Arc::make_mut(&mut self.hooks).register(hook);
    }

    pub fn loader(&self) -> &Arc<PromptLoader> {
        &self.loader
    }

    pub fn clients(&self) -> &ClientRegistry {
        &self.clients
    }

    pub fn hooks(&self) -> &HookManager {
        &self.hooks
    }

    /// Start building a run of `name`.
    pub fn prompt(&self, name: impl Into<String>) -> PromptRequest<'_> {
        PromptRequest::new(self, name)
    }

    /// Render and run `name` with `variables`.
    pub async fn run<I, K, V>(&self, name: &str, variables: I) -> Result<LlmResponse>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.prompt(name).variables(variables).execute().await
    }

    /// Render `name` and stream the completion.
    pub async fn run_stream<I, K, V>(&self, name: &str, variables: I) -> Result<PromptStream>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.prompt(name).variables(variables).execute_stream().await
    }

    pub(crate) async fn execute(&self, request: PromptRequest<'_>) -> Result<LlmResponse> {
        let mut ctx = HookContext::new(request.prompt_name.clone());
        let plan = match self.plan(request, &mut ctx) {
            Ok(plan) => plan,
            Err(e) => return Err(self.fail(&ctx, e, None).await),
        };

        if let Err(failure) = self.hooks.before_run(&mut ctx).await {
            return Err(self.fail(&ctx, failure.error, Some(failure.index)).await);
        }

        debug!(
            run_id = %ctx.run_id,
            prompt = %ctx.prompt_name,
            client = plan.client.name(),
            tools = plan.tools.len(),
            "dispatching prompt"
        );
        let response = match plan
            .client
            .generate(&ctx.rendered_prompt, plan.tools(), &plan.model)
            .await
        {
            Ok(response) => response,
            Err(e) => return Err(self.fail(&ctx, e, None).await),
        };

        if let Err(failure) = self.hooks.after_run(&ctx, &response).await {
            return Err(self.fail(&ctx, failure.error, Some(failure.index)).await);
        }

        info!(
            run_id = %ctx.run_id,
            prompt = %ctx.prompt_name,
            provider = %plan.model.provider,
            elapsed_ms = ctx.elapsed().as_millis() as u64,
            "prompt run completed"
        );
        Ok(response)
    }

    pub(crate) async fn execute_stream(&self, request: PromptRequest<'_>) -> Result<PromptStream> {
        let mut ctx = HookContext::new(request.prompt_name.clone()).with_streaming(true);
        let plan = match self.plan(request, &mut ctx) {
            Ok(plan) => plan,
            Err(e) => return Err(self.fail(&ctx, e, None).await),
        };

        if let Err(failure) = self.hooks.before_run(&mut ctx).await {
            return Err(self.fail(&ctx, failure.error, Some(failure.index)).await);
        }

        debug!(
            run_id = %ctx.run_id,
            prompt = %ctx.prompt_name,
            client = plan.client.name(),
            "opening prompt stream"
        );
        let fragments = match plan
            .client
            .stream_generate(&ctx.rendered_prompt, plan.tools(), &plan.model)
            .await
        {
            Ok(fragments) => fragments,
            Err(e) => return Err(self.fail(&ctx, e, None).await),
        };

        Ok(PromptStream::new(fragments, Arc::clone(&self.hooks), ctx))
    }

    /// Steps 1 to 5: everything that must hold before hooks or clients run.
    fn plan(&self, request: PromptRequest<'_>, ctx: &mut HookContext) -> Result<ExecutionPlan> {
        let PromptRequest {
            prompt_name,
            variables,
            client,
            tools,
            ..
        } = request;

        let definition = self.loader.get(&prompt_name)?;
        ctx.model = Some(definition.model.clone());
        if ctx.streaming {
            validate_streaming(&definition)?;
        }

        let (rendered, normalized) = definition.render_with(&variables)?;
        ctx.rendered_prompt = rendered;
        ctx.variables = normalized;

        let client = match client {
            Some(client) => client,
            None => self.clients.get(&definition.model.provider).ok_or_else(|| {
                Error::ClientNotRegistered {
                    provider: definition.model.provider.clone(),
                }
            })?,
        };

        let tools = resolve_tools(&definition, client.as_ref(), tools)?;
        ctx.tools = tools.clone();

        Ok(ExecutionPlan {
            client,
            model: definition.model.clone(),
            tools,
        })
    }

    async fn fail(&self, ctx: &HookContext, error: Error, skip: Option<usize>) -> Error {
        debug!(
            run_id = %ctx.run_id,
            prompt = %ctx.prompt_name,
            code = error.kind().code(),
            "prompt run failed: {}",
            error
        );
        self.hooks.on_error(ctx, &error, skip).await;
        error
    }
}
