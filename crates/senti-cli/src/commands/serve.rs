//! Web server command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use senti_core::ServiceConfig;

use super::ModelArgs;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "SENTI_PORT", default_value = "5000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "SENTI_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[command(flatten)]
    pub model: ModelArgs,
}

impl ServeArgs {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            host: self.host.clone(),
            port: self.port,
            max_chars: self.model.max_chars,
            backend: self.model.backend_config(),
        }
    }
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = args.service_config();
    config.validate()?;

    let model = senti_inference::load_model(&config.backend)
        .await
        .context("Failed to load sentiment model")?;
    tracing::info!(model = model.name(), max_chars = config.max_chars, "Model ready");

    println!();
    println!("  {} {}", "Senti".cyan().bold(), "Sentiment Service".bold());
    println!();
    println!("  {}      {}", "Model".green(), model.name());
    println!(
        "  {}    POST http://{}:{}/analyze",
        "Analyze".green(),
        config.host,
        config.port
    );
    println!(
        "  {}     GET  http://{}:{}/health",
        "Health".green(),
        config.host,
        config.port
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    senti_web::run_server(model, &config).await?;

    Ok(())
}
