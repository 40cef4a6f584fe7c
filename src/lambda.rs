//! Serves invocations from the AWS Lambda runtime.

use crate::notifier::Notifier;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info_span, Instrument};

/// Environment variable the Lambda runtime sets in every function sandbox.
pub const LAMBDA_MARKER_ENV_VAR: &str = "LAMBDA_TASK_ROOT";

/// How the process was launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Under the Lambda runtime: serve invocations until recycled.
    Hosted,
    /// Anywhere else: run the handler once and exit.
    Standalone,
}

impl RunMode {
    /// Detects the mode from the process environment.
    pub fn from_env() -> Self {
        Self::detect(|key| std::env::var(key).ok())
    }

    /// Detects the mode through `lookup`.
    pub fn detect<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(LAMBDA_MARKER_ENV_VAR) {
            Some(root) if !root.is_empty() => RunMode::Hosted,
            _ => RunMode::Standalone,
        }
    }
}

/// Handles one Lambda event. Errors are reported to the runtime as an
/// invocation failure whose message carries the full cause chain.
pub async fn handle_event(notifier: &Notifier, event: LambdaEvent<Value>) -> Result<(), Error> {
    let (payload, context) = event.into_parts();
    let span = info_span!("invocation", request_id = %context.request_id);
    notifier
        .handle_value(payload)
        .instrument(span)
        .await
        .map_err(|e| Error::from(format!("{:#}", anyhow::Error::from(e))))
}

/// Registers the handler with the Lambda runtime and serves invocations until
/// the runtime shuts the process down.
pub async fn run(notifier: Arc<Notifier>) -> Result<(), Error> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let notifier = notifier.clone();
        async move { handle_event(&notifier, event).await }
    }))
    .await
}
