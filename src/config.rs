//! Configuration management for sns-publish
//!
//! This module defines the main `Config` struct, responsible for holding the
//! process-level settings. It uses the `figment` crate to layer defaults, an
//! optional TOML file, environment variables and command-line arguments.
//!
//! The fallback topic ARN is deliberately not part of `Config`: it is read
//! from the environment on every invocation.

use crate::cli::Cli;
use crate::core::TOPIC_ARN_ENV_VAR;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level, as an `EnvFilter` directive.
    pub log_level: String,
    /// The format of log lines.
    pub log_format: LogFormat,
    /// Name of the environment variable holding the fallback topic ARN.
    pub topic_env_var: String,
    /// Settings for the AWS client.
    #[serde(default)]
    pub aws: AwsConfig,
}

/// The format for log output.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    PlainText,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "Json"),
            LogFormat::PlainText => write!(f, "PlainText"),
        }
    }
}

/// Overrides for the ambient AWS configuration.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AwsConfig {
    /// Region to use instead of the one discovered from the environment.
    pub region: Option<String>,
    /// Alternate SNS endpoint, e.g. a LocalStack instance.
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Loads the configuration, layering defaults, the optional file named by
    /// `--config`, `SNS_PUBLISH_*` environment variables and the CLI.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = &cli.config {
            figment = figment.merge(Toml::file(path));
        }
        let config: Config = figment
            // e.g. SNS_PUBLISH_LOG_LEVEL=debug, SNS_PUBLISH_AWS__REGION=eu-west-1
            .merge(Env::prefixed("SNS_PUBLISH_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::PlainText,
            topic_env_var: TOPIC_ARN_ENV_VAR.to_string(),
            aws: AwsConfig::default(),
        }
    }
}
