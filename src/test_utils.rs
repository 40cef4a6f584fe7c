//! Test doubles for the notifier's service traits.

use crate::core::{PublishReceipt, Publisher, TopicSource};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A publish call recorded by [`FakePublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCall {
    pub topic_arn: String,
    pub subject: String,
    pub message: String,
}

/// A publisher that records every call and optionally fails.
#[derive(Debug, Clone, Default)]
pub struct FakePublisher {
    calls: Arc<Mutex<Vec<PublishCall>>>,
    failure: Option<String>,
}

impl FakePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            calls: Arc::default(),
            failure: Some(message.into()),
        }
    }

    pub fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Publisher for FakePublisher {
    async fn publish(
        &self,
        topic_arn: &str,
        subject: &str,
        message: &str,
    ) -> anyhow::Result<PublishReceipt> {
        self.calls.lock().unwrap().push(PublishCall {
            topic_arn: topic_arn.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        });
        if let Some(failure) = &self.failure {
            anyhow::bail!("{}", failure);
        }
        Ok(PublishReceipt {
            message_id: Some(format!("fake-{}", self.call_count())),
        })
    }
}

/// A topic source that always returns the same value.
#[derive(Debug, Clone, Default)]
pub struct FixedTopicSource {
    value: Option<String>,
}

impl FixedTopicSource {
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }
}

impl TopicSource for FixedTopicSource {
    fn name(&self) -> &str {
        "FIXED"
    }

    fn topic_arn(&self) -> Option<String> {
        self.value.clone()
    }
}
