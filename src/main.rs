//! sns-publish - SNS notification function
//!
//! Serves Lambda invocations when launched by the Lambda runtime, otherwise
//! publishes a sample payload once and exits.

use anyhow::Result;
use clap::Parser;
use sns_publish::{
    cli::Cli,
    config::Config,
    lambda::{self, RunMode},
    logging,
    sns::SnsPublisher,
    standalone, EnvTopicSource, Notifier,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    logging::init(&config)?;

    let mode = RunMode::from_env();
    info!("-------------------- Configuration --------------------");
    info!("Run Mode: {:?}", mode);
    info!("Log Level: {}", config.log_level);
    info!("Log Format: {}", config.log_format);
    info!("Topic Fallback Variable: {}", config.topic_env_var);
    info!(
        "AWS Region Override: {}",
        config.aws.region.as_deref().unwrap_or("None")
    );
    info!(
        "SNS Endpoint Override: {}",
        config.aws.endpoint_url.as_deref().unwrap_or("None")
    );
    info!("-------------------------------------------------------");

    // The client is built once; without it no invocation is served.
    let publisher = match SnsPublisher::from_config(&config.aws).await {
        Ok(publisher) => publisher,
        Err(e) => {
            error!(error = %e, "unable to load SDK config");
            std::process::exit(1);
        }
    };
    let notifier = Arc::new(Notifier::new(
        Arc::new(publisher),
        Arc::new(EnvTopicSource::new(config.topic_env_var.clone())),
    ));

    match mode {
        RunMode::Hosted => {
            info!("Registering handler with the Lambda runtime.");
            lambda::run(notifier)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        RunMode::Standalone => {
            if let Err(e) = standalone::run_once(&notifier, &cli.sample_payload()).await {
                error!("standalone invocation failed: {:#}", anyhow::Error::from(e));
                std::process::exit(1);
            }
            info!("Standalone invocation completed.");
        }
    }

    Ok(())
}
