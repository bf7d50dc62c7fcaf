//! One-time model loading at startup.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use senti_core::{BackendConfig, SentiError, SentiResult, SentimentModel};

use crate::lexicon::LexiconClassifier;
use crate::local::LocalClassifier;
use crate::remote::RemoteClassifier;

/// Load the configured model. Called once; the returned handle is shared by
/// every request for the lifetime of the process.
pub async fn load_model(backend: &BackendConfig) -> SentiResult<Arc<dyn SentimentModel>> {
    match backend {
        BackendConfig::Local { model } => {
            if model.trim().is_empty() {
                return Err(SentiError::model_load("local backend requires a model id"));
            }

            info!(model = %model, "Loading pretrained sentiment model");
            let repo_id = model.clone();
            let classifier = tokio::task::spawn_blocking(move || LocalClassifier::load(&repo_id))
                .await
                .map_err(|e| SentiError::model_load(e.to_string()))??;

            Ok(Arc::new(classifier))
        }
        BackendConfig::Lexicon => {
            info!("Loading lexicon sentiment model (offline fallback)");
            Ok(Arc::new(LexiconClassifier::new()))
        }
        BackendConfig::Remote {
            url,
            model,
            api_token,
            timeout_secs,
        } => {
            if url.trim().is_empty() {
                return Err(SentiError::model_load("remote backend requires a model URL"));
            }

            let classifier = RemoteClassifier::new(
                url,
                model.as_deref(),
                api_token.as_deref(),
                Duration::from_secs(*timeout_secs),
            );

            if classifier.health_check().await {
                info!(endpoint = %classifier.endpoint(), "Remote sentiment model reachable");
            } else {
                // Requests will degrade to neutral until the host comes up.
                warn!(
                    endpoint = %classifier.endpoint(),
                    "Remote sentiment model not reachable yet"
                );
            }

            Ok(Arc::new(classifier))
        }
    }
}
