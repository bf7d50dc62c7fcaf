//! The inference collaborator seam.

use async_trait::async_trait;

use crate::error::InferenceResult;
use crate::model::Prediction;

/// A pretrained sentiment model: text in, label and confidence out.
///
/// Implementations are loaded once at startup and shared read-only between
/// requests behind an `Arc<dyn SentimentModel>`.
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// Classify already-truncated text.
    async fn predict(&self, text: &str) -> InferenceResult<Prediction>;

    /// Short backend name for logs and the health endpoint.
    fn name(&self) -> &str;
}
