//! HTTP client for the analyze endpoint.
//!
//! Lets other services (news aggregators, the CLI) label text through a
//! running senti server. Any failure is logged and reported as `None`, so
//! callers can keep going without a sentiment.

use std::time::Duration;
use tracing::{debug, warn};

use senti_core::{AnalysisResult, AnalyzeRequest};

/// Default senti server URL.
const DEFAULT_SENTI_URL: &str = "http://127.0.0.1:5000";

/// Text labeled for a news article: its title and description joined by a
/// space. A missing description contributes nothing.
pub fn article_text(title: &str, description: Option<&str>) -> String {
    format!("{} {}", title, description.unwrap_or(""))
}

/// Whether an article's label passes a sentiment filter.
///
/// Comparison ignores case. Articles that could not be labeled never match.
pub fn matches_sentiment(label: Option<&str>, wanted: &str) -> bool {
    label.is_some_and(|label| label.eq_ignore_ascii_case(wanted))
}

/// Calls `POST /analyze` on a senti server.
#[derive(Clone)]
pub struct SentimentClient {
    client: reqwest::Client,
    base_url: String,
}

impl SentimentClient {
    /// Create a client with default settings.
    ///
    /// Uses the `SENTI_URL` environment variable if set,
    /// otherwise defaults to `http://127.0.0.1:5000`.
    pub fn new() -> Self {
        let base_url =
            std::env::var("SENTI_URL").unwrap_or_else(|_| DEFAULT_SENTI_URL.to_string());
        Self::with_url(&base_url)
    }

    /// Create a client with a custom base URL.
    pub fn with_url(base_url: &str) -> Self {
        debug!(base_url = %base_url, "SentimentClient initialized");
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Label `text`, returning the `sentiment` field of the response.
    ///
    /// A degraded 500 answer still carries a sentiment ("neutral") and is
    /// returned as such; only transport errors and unusable bodies give `None`.
    pub async fn analyze(&self, text: &str) -> Option<String> {
        self.analyze_full(text).await.map(|result| result.sentiment.to_string())
    }

    /// Label a news article from its title and description.
    ///
    /// `None` means the article stays unlabeled; it is still usable, it just
    /// drops out of sentiment filters.
    pub async fn analyze_article(&self, title: &str, description: Option<&str>) -> Option<String> {
        self.analyze(&article_text(title, description)).await
    }

    /// Like [`analyze`](Self::analyze) but keeps the server's error message.
    pub async fn analyze_full(&self, text: &str) -> Option<AnalysisResult> {
        let url = format!("{}/analyze", self.base_url);

        let response = match self
            .client
            .post(&url)
            .json(&AnalyzeRequest::new(text))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, url = %url, "Failed to reach sentiment service");
                return None;
            }
        };

        let status = response.status();
        match response.json::<AnalysisResult>().await {
            Ok(result) => {
                if let Some(error) = &result.error {
                    warn!(
                        status_code = %status,
                        error = %error,
                        "Sentiment service reported an error"
                    );
                }
                Some(result)
            }
            Err(e) => {
                warn!(status_code = %status, error = %e, "Unreadable sentiment response");
                None
            }
        }
    }
}

impl Default for SentimentClient {
    fn default() -> Self {
        Self::new()
    }
}
