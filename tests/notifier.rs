//! Integration tests for the notifier against the process environment.

use serial_test::serial;
use sns_publish::test_utils::FakePublisher;
use sns_publish::NotifierError;
use std::sync::Arc;

mod helpers;
use helpers::{env_backed_notifier, EnvVarGuard};

const TOPIC: &str = "arn:aws:sns:us-east-1:123:topic";
const ENV_TOPIC: &str = "arn:aws:sns:us-east-1:123:from-env";

#[tokio::test]
#[serial]
async fn test_payload_topic_ignores_environment() {
    let _env = EnvVarGuard::set("SNS_TOPIC_ARN", ENV_TOPIC);
    let publisher = Arc::new(FakePublisher::new());
    let notifier = env_backed_notifier(&publisher);

    let event = format!(r#"{{"snsTopicArn": "{TOPIC}", "subject": "hello", "message": "world!"}}"#);
    notifier.handle(event.as_bytes()).await.unwrap();

    assert_eq!(publisher.calls()[0].topic_arn, TOPIC);
}

#[tokio::test]
#[serial]
async fn test_environment_fallback() {
    let _env = EnvVarGuard::set("SNS_TOPIC_ARN", ENV_TOPIC);
    let publisher = Arc::new(FakePublisher::new());
    let notifier = env_backed_notifier(&publisher);

    notifier
        .handle(br#"{"subject": "hello", "message": "world!"}"#)
        .await
        .unwrap();

    assert_eq!(publisher.calls()[0].topic_arn, ENV_TOPIC);
}

#[tokio::test]
#[serial]
async fn test_environment_is_read_per_invocation() {
    let publisher = Arc::new(FakePublisher::new());
    let notifier = env_backed_notifier(&publisher);

    {
        let _env = EnvVarGuard::set("SNS_TOPIC_ARN", ENV_TOPIC);
        notifier.handle(br#"{"message": "first"}"#).await.unwrap();
    }
    {
        let _env = EnvVarGuard::set("SNS_TOPIC_ARN", TOPIC);
        notifier.handle(br#"{"message": "second"}"#).await.unwrap();
    }

    let calls = publisher.calls();
    assert_eq!(calls[0].topic_arn, ENV_TOPIC);
    assert_eq!(calls[1].topic_arn, TOPIC);
}

#[tokio::test]
#[serial]
async fn test_missing_everywhere_never_publishes() {
    let publisher = Arc::new(FakePublisher::new());
    let notifier = env_backed_notifier(&publisher);

    let event: &[u8] = br#"{"snsTopicArn": "", "subject": "hello", "message": "world!"}"#;
    let unset_result = {
        let _env = EnvVarGuard::unset("SNS_TOPIC_ARN");
        notifier.handle(event).await
    };
    let empty_result = {
        let _env = EnvVarGuard::set("SNS_TOPIC_ARN", "");
        notifier.handle(event).await
    };

    for result in [unset_result, empty_result] {
        match result {
            Err(NotifierError::MissingDestination { env_var }) => {
                assert_eq!(env_var, "SNS_TOPIC_ARN")
            }
            other => panic!("expected MissingDestination, got {:?}", other),
        }
    }
    assert_eq!(publisher.call_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_provider_failure_then_success_are_independent() {
    let _env = EnvVarGuard::set("SNS_TOPIC_ARN", ENV_TOPIC);
    let failing = Arc::new(FakePublisher::failing("AuthorizationError: not authorized"));
    let result = env_backed_notifier(&failing)
        .handle(br#"{"message": "m"}"#)
        .await;
    assert!(matches!(result, Err(NotifierError::PublishFailed { .. })));
    assert_eq!(failing.call_count(), 1);

    let working = Arc::new(FakePublisher::new());
    let notifier = env_backed_notifier(&working);
    notifier.handle(br#"{"message": "m"}"#).await.unwrap();
    notifier.handle(br#"{"message": "m"}"#).await.unwrap();
    assert_eq!(working.call_count(), 2);
}
