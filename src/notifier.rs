//! The notifier: decode an event, resolve the topic, publish once.

use crate::core::{
    DestinationSource, NotifierError, PublishRequest, Publisher, ResolvedDestination,
    TopicSource, TOPIC_ARN_ENV_VAR,
};
use serde_json::Value;
use std::env::VarError;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Reads the fallback topic ARN from a process environment variable.
///
/// The variable is read on every call, so changes between invocations are
/// picked up. A value that is not valid UTF-8 is logged and treated as unset.
#[derive(Debug, Clone)]
pub struct EnvTopicSource {
    var: String,
}

impl EnvTopicSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvTopicSource {
    fn default() -> Self {
        Self::new(TOPIC_ARN_ENV_VAR)
    }
}

impl TopicSource for EnvTopicSource {
    fn name(&self) -> &str {
        &self.var
    }

    fn topic_arn(&self) -> Option<String> {
        match std::env::var(&self.var) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(raw)) => {
                warn!(
                    env_var = %self.var,
                    value = ?raw,
                    "environment variable is set but is not valid UTF-8, ignoring it"
                );
                None
            }
        }
    }
}

/// Handles invocations against an already-initialized publisher.
///
/// A `Notifier` is built once per process and shared by reference across
/// invocations; it holds no mutable state.
#[derive(Clone)]
pub struct Notifier {
    publisher: Arc<dyn Publisher>,
    fallback: Arc<dyn TopicSource>,
}

impl Notifier {
    /// Creates a new `Notifier`.
    pub fn new(publisher: Arc<dyn Publisher>, fallback: Arc<dyn TopicSource>) -> Self {
        Self {
            publisher,
            fallback,
        }
    }

    /// Handles a raw JSON-encoded event.
    pub async fn handle(&self, raw_event: &[u8]) -> Result<(), NotifierError> {
        let request = PublishRequest::from_slice(raw_event).map_err(|e| {
            error!(error = %e, "failed to unmarshal event");
            NotifierError::MalformedInput(e)
        })?;
        self.dispatch(request).await
    }

    /// Handles an event the runtime already decoded into JSON.
    pub async fn handle_value(&self, event: Value) -> Result<(), NotifierError> {
        let request = PublishRequest::from_value(event).map_err(|e| {
            error!(error = %e, "failed to unmarshal event");
            NotifierError::MalformedInput(e)
        })?;
        self.dispatch(request).await
    }

    /// Applies the fallback rule: a non-empty payload field wins, then the
    /// ambient source.
    pub fn resolve_destination(
        &self,
        request: &PublishRequest,
    ) -> Result<ResolvedDestination, NotifierError> {
        if !request.destination_id.is_empty() {
            debug!(topic_arn = %request.destination_id, "sns topic arn provided in payload");
            return Ok(ResolvedDestination {
                topic_arn: request.destination_id.clone(),
                source: DestinationSource::Payload,
            });
        }

        debug!(
            env_var = self.fallback.name(),
            "sns topic arn not provided in payload, checking environment variable"
        );
        match self.fallback.topic_arn().filter(|arn| !arn.is_empty()) {
            Some(topic_arn) => {
                debug!(
                    %topic_arn,
                    env_var = self.fallback.name(),
                    "sns topic arn provided in environment variable"
                );
                Ok(ResolvedDestination {
                    topic_arn,
                    source: DestinationSource::Environment,
                })
            }
            None => {
                error!("no sns topic arn configured in environment or in payload");
                Err(NotifierError::MissingDestination {
                    env_var: self.fallback.name().to_string(),
                })
            }
        }
    }

    #[instrument(skip_all)]
    async fn dispatch(&self, request: PublishRequest) -> Result<(), NotifierError> {
        let destination = self.resolve_destination(&request)?;

        info!(
            topic_arn = %destination.topic_arn,
            source = %destination.source,
            "publishing message to sns topic"
        );
        match self
            .publisher
            .publish(&destination.topic_arn, &request.subject, &request.body)
            .await
        {
            Ok(receipt) => {
                info!(message_id = ?receipt.message_id, "message sent successfully");
                Ok(())
            }
            Err(e) => {
                error!(
                    topic_arn = %destination.topic_arn,
                    error = %e,
                    "failed to publish message to sns topic"
                );
                Err(NotifierError::PublishFailed {
                    topic_arn: destination.topic_arn,
                    source: e,
                })
            }
        }
    }
}
