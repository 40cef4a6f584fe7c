#![allow(dead_code)]
//! Shared helpers for integration tests.

use sns_publish::test_utils::FakePublisher;
use sns_publish::{EnvTopicSource, Notifier};
use std::sync::Arc;

/// Sets an environment variable for the lifetime of the guard and restores
/// the previous value on drop. Tests using it must be `#[serial]`.
pub struct EnvVarGuard {
    key: String,
    previous: Option<String>,
}

impl EnvVarGuard {
    pub fn set(key: &str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value);
        Self {
            key: key.to_string(),
            previous,
        }
    }

    pub fn unset(key: &str) -> Self {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(value) => std::env::set_var(&self.key, value),
            None => std::env::remove_var(&self.key),
        }
    }
}

/// A notifier reading its fallback from the real process environment.
pub fn env_backed_notifier(publisher: &Arc<FakePublisher>) -> Notifier {
    Notifier::new(publisher.clone(), Arc::new(EnvTopicSource::default()))
}
