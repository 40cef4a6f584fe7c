/// sns-publish - forwards an event's subject and message to an SNS topic
///
/// This library provides the notifier and its adapters: the SNS publisher,
/// the Lambda runtime entry and the standalone entry.
pub mod cli;
pub mod config;
pub mod core;
pub mod lambda;
pub mod logging;
pub mod notifier;
pub mod sns;
pub mod standalone;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export core types for convenience
pub use crate::core::*;
pub use notifier::{EnvTopicSource, Notifier};
