//! The analysis boundary between a request and the inference collaborator.
//!
//! Empty input short-circuits to neutral, everything else is truncated and
//! handed to the model. Failures come back as an explicit [`Outcome`] rather
//! than an error the caller has to remember to catch.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::classifier::SentimentModel;
use crate::error::InferenceError;
use crate::model::{AnalysisResult, Sentiment};

/// Longest input, in characters, handed to the model.
pub const DEFAULT_MAX_CHARS: usize = 512;

/// What one analysis produced.
#[derive(Debug)]
pub enum Outcome {
    /// Input was empty or whitespace; the model was not called.
    Empty,
    /// The model answered with a usable label.
    Labeled(Sentiment),
    /// The model failed, panicked or returned garbage.
    Failed(InferenceError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// Convert into the response body. Failures degrade to neutral.
    pub fn into_result(self) -> AnalysisResult {
        match self {
            Outcome::Empty => AnalysisResult::neutral(),
            Outcome::Labeled(sentiment) => AnalysisResult::labeled(sentiment),
            Outcome::Failed(err) => AnalysisResult::degraded(err.to_string()),
        }
    }
}

/// Runs request text through a shared sentiment model.
#[derive(Clone)]
pub struct Analyzer {
    model: Arc<dyn SentimentModel>,
    max_chars: usize,
}

impl Analyzer {
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self::with_max_chars(model, DEFAULT_MAX_CHARS)
    }

    pub fn with_max_chars(model: Arc<dyn SentimentModel>, max_chars: usize) -> Self {
        Self { model, max_chars }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Analyze one piece of text.
    pub async fn analyze(&self, text: &str) -> Outcome {
        if text.trim().is_empty() {
            debug!("Empty input, skipping inference");
            return Outcome::Empty;
        }

        let input = truncate_chars(text, self.max_chars).to_string();
        let model = Arc::clone(&self.model);
        debug!(chars = input.chars().count(), model = model.name(), "Running inference");

        // A panicking model must not take the request down with it.
        let joined = tokio::spawn(async move { model.predict(&input).await }).await;

        let prediction = match joined {
            Ok(Ok(prediction)) => prediction,
            Ok(Err(err)) => {
                warn!(error = %err, "Inference failed");
                return Outcome::Failed(err);
            }
            Err(join_err) => {
                warn!(error = %join_err, "Inference task aborted");
                return Outcome::Failed(InferenceError::Panicked(join_err.to_string()));
            }
        };

        if prediction.label.trim().is_empty() {
            warn!(score = prediction.score, "Model returned an empty label");
            return Outcome::Failed(InferenceError::malformed("empty label"));
        }

        debug!(label = %prediction.label, score = prediction.score, "Inference complete");
        Outcome::Labeled(Sentiment::from_label(&prediction.label))
    }
}

/// Return the prefix of `text` holding at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
