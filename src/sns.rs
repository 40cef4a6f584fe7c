//! A publisher backed by Amazon SNS.

use crate::config::AwsConfig;
use crate::core::{NotifierError, PublishReceipt, Publisher};
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_sns::config::Region;
use aws_sdk_sns::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sns::operation::publish::PublishError;
use aws_sdk_sns::Client;
use tracing::{debug, info, instrument};

/// Publishes messages with an `aws_sdk_sns::Client`.
///
/// The client is built once and shared across invocations.
#[derive(Debug, Clone)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    /// Wraps an already-configured client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the ambient AWS configuration, with SDK retries
    /// disabled so that each invocation makes exactly one attempt.
    ///
    /// # Errors
    /// Returns `ClientInitFailed` if no region is configured or no credentials
    /// can be resolved.
    pub async fn from_config(config: &AwsConfig) -> Result<Self, NotifierError> {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(url) = &config.endpoint_url {
            loader = loader.endpoint_url(url.clone());
        }
        let sdk_config = loader.load().await;

        verify_sdk_config(&sdk_config).await?;
        info!(
            region = ?sdk_config.region(),
            endpoint_url = ?config.endpoint_url,
            "sns client initialized"
        );

        Ok(Self::new(Client::new(&sdk_config)))
    }
}

/// Checks that `sdk_config` names a region and that its credentials chain
/// yields credentials. Credentials are resolved once here so that a process
/// without any never serves an invocation.
pub async fn verify_sdk_config(sdk_config: &SdkConfig) -> Result<(), NotifierError> {
    if sdk_config.region().is_none() {
        return Err(NotifierError::ClientInitFailed(
            "no AWS region configured; set AWS_REGION or --region".to_string(),
        ));
    }
    let provider = sdk_config.credentials_provider().ok_or_else(|| {
        NotifierError::ClientInitFailed("no AWS credentials provider configured".to_string())
    })?;
    provider.provide_credentials().await.map_err(|e| {
        NotifierError::ClientInitFailed(format!(
            "unable to resolve AWS credentials: {}",
            DisplayErrorContext(&e)
        ))
    })?;
    Ok(())
}

/// Reduces an SDK error to a one-line cause: the service's error code and
/// message when SNS answered, otherwise the transport error chain.
fn describe_publish_error(err: SdkError<PublishError>) -> anyhow::Error {
    match err.as_service_error() {
        Some(service) => anyhow::anyhow!(
            "{}: {}",
            service.code().unwrap_or("Unknown"),
            service.message().unwrap_or("no message")
        ),
        None => anyhow::Error::new(err),
    }
}

#[async_trait]
impl Publisher for SnsPublisher {
    #[instrument(
        skip(self, subject, message),
        fields(subject_len = subject.len(), message_len = message.len())
    )]
    async fn publish(
        &self,
        topic_arn: &str,
        subject: &str,
        message: &str,
    ) -> anyhow::Result<PublishReceipt> {
        // SNS rejects an empty Subject, so an empty one is left unset.
        let subject = Some(subject).filter(|s| !s.is_empty()).map(str::to_string);
        let output = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .set_subject(subject)
            .message(message)
            .send()
            .await
            .map_err(describe_publish_error)?;

        debug!(message_id = ?output.message_id(), "sns accepted message");
        Ok(PublishReceipt {
            message_id: output.message_id().map(str::to_string),
        })
    }
}
