//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. Configuration-bearing arguments are merged over the config
//! file and environment variables; the sample-payload arguments only shape the
//! event sent in standalone mode.

use crate::standalone::SamplePayload;
use clap::Parser;
use figment::{
    value::{Dict, Map, Tag, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Publishes an event's subject and message to an SNS topic.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Logging level or `EnvFilter` directive (e.g. "debug").
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json_logs: bool,

    /// AWS region, overriding the ambient one.
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Alternate SNS endpoint URL.
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Topic ARN for the standalone sample payload.
    #[arg(long, value_name = "ARN")]
    pub topic_arn: Option<String>,

    /// Subject for the standalone sample payload.
    #[arg(long, value_name = "SUBJECT")]
    pub subject: Option<String>,

    /// Message for the standalone sample payload.
    #[arg(long, value_name = "MESSAGE")]
    pub message: Option<String>,
}

impl Cli {
    /// The event sent when running outside the Lambda runtime.
    pub fn sample_payload(&self) -> SamplePayload {
        let mut payload = SamplePayload::default();
        if let Some(topic_arn) = &self.topic_arn {
            payload.topic_arn = Some(topic_arn.clone());
        }
        if let Some(subject) = &self.subject {
            payload.subject = subject.clone();
        }
        if let Some(message) = &self.message {
            payload.message = message.clone();
        }
        payload
    }
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        // Only an explicit flag overrides; absence leaves lower layers intact.
        if self.json_logs {
            dict.insert("log_format".into(), Value::from("Json"));
        }

        let mut aws = Dict::new();
        if let Some(region) = &self.region {
            aws.insert("region".into(), Value::from(region.clone()));
        }
        if let Some(url) = &self.endpoint_url {
            aws.insert("endpoint_url".into(), Value::from(url.clone()));
        }
        if !aws.is_empty() {
            dict.insert("aws".into(), Value::Dict(Tag::Default, aws));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
