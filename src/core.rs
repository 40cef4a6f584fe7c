//! Core domain types and service traits for sns-publish
//!
//! This module defines the invocation payload, the error taxonomy and the
//! trait contracts the notifier depends on. Concrete implementations live in
//! [`crate::sns`] (the remote publisher) and [`crate::notifier`] (the ambient
//! topic source).

use async_trait::async_trait;
use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// The environment variable consulted when the payload carries no topic ARN.
pub const TOPIC_ARN_ENV_VAR: &str = "SNS_TOPIC_ARN";

/// A single publish request, decoded from an invocation payload.
///
/// Missing and `null` fields are treated as empty strings. Unknown fields are
/// ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct PublishRequest {
    /// Target topic ARN. Optional; see [`TOPIC_ARN_ENV_VAR`].
    #[serde(rename = "snsTopicArn", default, deserialize_with = "null_as_empty")]
    pub destination_id: String,
    /// Message subject. May be empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,
    /// Message body.
    #[serde(rename = "message", default, deserialize_with = "null_as_empty")]
    pub body: String,
}

impl PublishRequest {
    /// Decodes a request from raw JSON bytes.
    pub fn from_slice(raw_event: &[u8]) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_slice(raw_event)?)
    }

    /// Decodes a request from an already-parsed JSON value. Anything other
    /// than an object is rejected, including arrays that serde would
    /// otherwise accept positionally.
    pub fn from_value(event: Value) -> Result<Self, serde_json::Error> {
        let kind = match &event {
            Value::Object(_) => None,
            Value::Null => Some("null"),
            Value::Bool(_) => Some("a boolean"),
            Value::Number(_) => Some("a number"),
            Value::String(_) => Some("a string"),
            Value::Array(_) => Some("an array"),
        };
        match kind {
            None => serde_json::from_value(event),
            Some(kind) => Err(serde_json::Error::custom(format!(
                "expected a JSON object, found {}",
                kind
            ))),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Where the resolved topic ARN came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationSource {
    /// The `snsTopicArn` field of the payload.
    Payload,
    /// The ambient environment variable.
    Environment,
}

impl std::fmt::Display for DestinationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DestinationSource::Payload => write!(f, "payload"),
            DestinationSource::Environment => write!(f, "environment"),
        }
    }
}

/// A topic ARN that passed the fallback rule. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDestination {
    pub topic_arn: String,
    pub source: DestinationSource,
}

/// The result of a successful publish call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublishReceipt {
    /// Identifier assigned by the provider, if it returned one.
    pub message_id: Option<String>,
}

/// Errors raised while handling an invocation or building the client.
#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("failed to decode event payload")]
    MalformedInput(#[source] serde_json::Error),

    #[error(
        "missing required sns topic arn in payload field `snsTopicArn` or in environment variable {env_var}"
    )]
    MissingDestination { env_var: String },

    #[error("failed to publish message to sns topic {topic_arn}")]
    PublishFailed {
        topic_arn: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("unable to initialize sns client: {0}")]
    ClientInitFailed(String),
}

// =============================================================================
// Service Traits
// =============================================================================

/// Publishes a message to a notification topic.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Performs exactly one publish attempt.
    ///
    /// # Arguments
    /// * `topic_arn` - The resolved, non-empty topic ARN
    /// * `subject` - The message subject, possibly empty
    /// * `message` - The message body
    ///
    /// # Returns
    /// * `Ok(PublishReceipt)` once the provider accepted the message
    /// * `Err` for any provider or transport failure
    async fn publish(
        &self,
        topic_arn: &str,
        subject: &str,
        message: &str,
    ) -> anyhow::Result<PublishReceipt>;
}

/// Supplies the fallback topic ARN from ambient configuration.
///
/// Implementations are consulted on every invocation and must not cache.
pub trait TopicSource: Send + Sync {
    /// The name of the setting, used in logs and error messages.
    fn name(&self) -> &str;

    /// Returns the current value, if any.
    fn topic_arn(&self) -> Option<String>;
}
