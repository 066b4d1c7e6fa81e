//! Fragment stream returned by streaming runs.

use crate::hooks::{HookContext, HookManager};
use crate::types::LlmResponse;
use crate::{BoxStream, Result};
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

struct StreamState {
    fragments: BoxStream<'static, String>,
    collected: String,
    hooks: Arc<HookManager>,
    context: HookContext,
    finished: bool,
}

/// Lazy, single-pass sequence of text fragments.
///
/// `after_run` hooks fire once the client's stream is exhausted, with the
/// concatenated output. A client error is yielded as the final item after
/// `on_error` hooks have seen it. Dropping the stream early cancels the run
/// and no further hooks fire.
pub struct PromptStream {
    run_id: String,
    inner: BoxStream<'static, String>,
}

impl PromptStream {
    pub(crate) fn new(
        fragments: BoxStream<'static, String>,
        hooks: Arc<HookManager>,
        context: HookContext,
    ) -> Self {
        let run_id = context.run_id.clone();
        let state = StreamState {
            fragments,
            collected: String::new(),
            hooks,
            context,
            finished: false,
        };

        let inner = futures::stream::unfold(state, |mut state| async move {
            if state.finished {
                return None;
            }
            match state.fragments.next().await {
                Some(Ok(fragment)) => {
                    state.collected.push_str(&fragment);
                    Some((Ok(fragment), state))
                }
                Some(Err(error)) => {
                    state.finished = true;
                    state.hooks.on_error(&state.context, &error, None).await;
                    Some((Err(error), state))
                }
                None => {
                    state.finished = true;
                    let response = LlmResponse::new(std::mem::take(&mut state.collected));
                    match state.hooks.after_run(&state.context, &response).await {
                        Ok(()) => {
                            tracing::debug!(
                                run_id = %state.context.run_id,
                                prompt = %state.context.prompt_name,
                                output_chars = response.output.len(),
                                "prompt stream finished"
                            );
                            None
                        }
                        Err(failure) => {
                            state
                                .hooks
                                .on_error(&state.context, &failure.error, Some(failure.index))
                                .await;
                            Some((Err(failure.error), state))
                        }
                    }
                }
            }
        });

        Self {
            run_id,
            inner: Box::pin(inner),
        }
    }

    /// Identifier shared with the hook context of this run.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Drain the stream and concatenate its fragments.
    pub async fn collect_output(mut self) -> Result<String> {
        let mut output = String::new();
        while let Some(fragment) = self.next().await {
            output.push_str(&fragment?);
        }
        Ok(output)
    }
}

impl Stream for PromptStream {
    type Item = Result<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for PromptStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptStream")
            .field("run_id", &self.run_id)
            .finish_non_exhaustive()
    }
}
