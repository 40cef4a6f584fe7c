//! Runs the notifier once outside the Lambda runtime.

use crate::core::NotifierError;
use crate::notifier::Notifier;
use serde::Serialize;
use tracing::info;

/// The event sent in standalone mode.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SamplePayload {
    #[serde(rename = "snsTopicArn", skip_serializing_if = "Option::is_none")]
    pub topic_arn: Option<String>,
    pub subject: String,
    pub message: String,
}

impl Default for SamplePayload {
    fn default() -> Self {
        Self {
            topic_arn: None,
            subject: "hello".to_string(),
            message: "world!".to_string(),
        }
    }
}

/// Sends `payload` through the notifier exactly once.
pub async fn run_once(notifier: &Notifier, payload: &SamplePayload) -> Result<(), NotifierError> {
    let raw = serde_json::to_vec(payload).map_err(NotifierError::MalformedInput)?;
    info!(payload = %String::from_utf8_lossy(&raw), "running handler once in standalone mode");
    notifier.handle(&raw).await
}
