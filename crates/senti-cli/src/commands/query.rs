//! Classification through a running service.

use anyhow::Result;
use clap::Args;

use senti_web::SentimentClient;

use crate::output;

#[derive(Args)]
pub struct QueryArgs {
    /// Text to classify
    pub text: String,

    /// Base URL of the senti service [default: $SENTI_URL or http://127.0.0.1:5000]
    #[arg(long)]
    pub url: Option<String>,
}

pub async fn execute(args: QueryArgs) -> Result<()> {
    let client = match &args.url {
        Some(url) => SentimentClient::with_url(url),
        None => SentimentClient::new(),
    };

    let Some(result) = client.analyze_full(&args.text).await else {
        anyhow::bail!("no usable answer from {}", client.base_url());
    };

    if let Some(error) = &result.error {
        output::print_failure(error);
    }
    output::print_sentiment(&result.sentiment);

    if result.error.is_some() {
        anyhow::bail!("service reported an error");
    }
    Ok(())
}
