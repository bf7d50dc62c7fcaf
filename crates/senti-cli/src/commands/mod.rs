//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use senti_core::config::{DEFAULT_LOCAL_MODEL, DEFAULT_TIMEOUT_SECS};
use senti_core::{BackendConfig, DEFAULT_MAX_CHARS};
use senti_inference::remote::{DEFAULT_MODEL, DEFAULT_REMOTE_URL};

pub mod analyze;
pub mod query;
pub mod serve;

/// Senti - pretrained sentiment classification over HTTP
#[derive(Parser)]
#[command(name = "senti")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true, env = "SENTI_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP service
    Serve(serve::ServeArgs),

    /// Classify text locally with the configured model
    Analyze(analyze::AnalyzeArgs),

    /// Classify text through a running service
    Query(query::QueryArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Analyze(args) => analyze::execute(args).await,
            Commands::Query(args) => query::execute(args).await,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Pretrained model run in-process (downloaded from the Hugging Face hub)
    Local,
    /// Built-in word-list classifier, for offline use
    Lexicon,
    /// Hugging Face style text-classification endpoint
    Remote,
}

/// Model selection shared by `serve` and `analyze`.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Inference backend
    #[arg(long, value_enum, env = "SENTI_BACKEND", default_value = "local")]
    pub backend: Backend,

    /// Base URL of the text-classification endpoint
    #[arg(long, env = "SENTI_MODEL_URL")]
    pub model_url: Option<String>,

    /// Model id: hub repository for `local`, appended as /models/<id> for `remote`
    #[arg(long, env = "SENTI_MODEL")]
    pub model: Option<String>,

    /// Bearer token for the inference endpoint
    #[arg(long, env = "SENTI_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Timeout for one inference call, in seconds
    #[arg(long, env = "SENTI_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Characters of input handed to the model
    #[arg(long, env = "SENTI_MAX_CHARS", default_value_t = DEFAULT_MAX_CHARS)]
    pub max_chars: usize,
}

impl ModelArgs {
    pub fn backend_config(&self) -> BackendConfig {
        match self.backend {
            Backend::Local => BackendConfig::Local {
                model: self
                    .model
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LOCAL_MODEL.to_string()),
            },
            Backend::Lexicon => BackendConfig::Lexicon,
            Backend::Remote => {
                // Without an explicit URL, use the hosted API and its default model.
                let (url, model) = match &self.model_url {
                    Some(url) => (url.clone(), self.model.clone()),
                    None => (
                        DEFAULT_REMOTE_URL.to_string(),
                        Some(self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())),
                    ),
                };
                BackendConfig::Remote {
                    url,
                    model,
                    api_token: self.api_token.clone(),
                    timeout_secs: self.timeout_secs,
                }
            }
        }
    }
}
