//! Local one-shot classification.

use anyhow::{Context, Result};
use clap::Args;

use senti_core::{Analyzer, Outcome, ServiceConfig};

use super::ModelArgs;
use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Text to classify
    pub text: String,

    /// Print the JSON response body instead of the label
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub model: ModelArgs,
}

pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let config = ServiceConfig {
        max_chars: args.model.max_chars,
        backend: args.model.backend_config(),
        ..Default::default()
    };
    config.validate()?;

    let model = senti_inference::load_model(&config.backend)
        .await
        .context("Failed to load sentiment model")?;

    let analyzer = Analyzer::with_max_chars(model, config.max_chars);
    let outcome = analyzer.analyze(&args.text).await;
    let failed = outcome.is_failure();

    if let Outcome::Failed(err) = &outcome {
        output::print_failure(&err.to_string());
    }

    let result = outcome.into_result();
    if args.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        output::print_sentiment(&result.sentiment);
    }

    if failed {
        anyhow::bail!("inference failed");
    }
    Ok(())
}
