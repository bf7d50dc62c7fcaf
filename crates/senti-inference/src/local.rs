//! In-process pretrained sentiment model.
//!
//! Loads a ModernBERT sequence-classification checkpoint from the Hugging Face
//! hub (cached after the first download) and runs it with candle. Labels come
//! from the checkpoint's `id2label` table, so whatever the model was trained
//! on ("positive", "NEGATIVE", "neutral", ...) is what callers see.

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor, D};
use candle_nn::{ops::softmax, VarBuilder};
use candle_transformers::models::modernbert::{
    ClassifierConfig, ClassifierPooling, Config,
    ModernBertForSequenceClassification as CandleModernBertForSequenceClassification,
};
use hf_hub::{api::sync::Api, Repo, RepoType};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokenizers::{Encoding, Tokenizer};
use tracing::{debug, info};

use senti_core::{
    InferenceError, InferenceResult, Prediction, SentiError, SentiResult, SentimentModel,
};

/// Pretrained classifier running on the local CPU or GPU.
pub struct LocalClassifier {
    name: String,
    inner: Arc<Inner>,
}

struct Inner {
    model: CandleModernBertForSequenceClassification,
    tokenizer: Tokenizer,
    device: Device,
    id2label: HashMap<String, String>,
}

#[derive(Deserialize)]
struct LabelMap {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

impl LocalClassifier {
    /// Fetch and load `repo_id`. Blocks on downloads and weight loading, so
    /// async callers should run it on a blocking thread.
    pub fn load(repo_id: &str) -> SentiResult<Self> {
        let device = Device::cuda_if_available(0).map_err(load_error)?;

        let api = Api::new().map_err(load_error)?;
        let repo = api.repo(Repo::new(repo_id.to_string(), RepoType::Model));

        let config_path = repo.get("config.json").map_err(load_error)?;
        let weights_path = repo
            .get("model.safetensors")
            .or_else(|_| repo.get("pytorch_model.bin"))
            .map_err(load_error)?;
        let tokenizer_path = repo.get("tokenizer.json").map_err(load_error)?;

        let (config, id2label) = read_config(&config_path)?;

        let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device) }
                .map_err(load_error)?
        } else {
            VarBuilder::from_pth(&weights_path, DType::F32, &device).map_err(load_error)?
        };

        let model = CandleModernBertForSequenceClassification::load(vb, &config)
            .map_err(load_error)?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            SentiError::model_load(format!(
                "Failed to load tokenizer from '{}': {}",
                tokenizer_path.display(),
                e
            ))
        })?;

        info!(model = repo_id, labels = id2label.len(), device = ?device, "Loaded local model");

        Ok(Self {
            name: repo_id.to_string(),
            inner: Arc::new(Inner {
                model,
                tokenizer,
                device,
                id2label,
            }),
        })
    }
}

impl Inner {
    fn classify(&self, text: &str) -> InferenceResult<Prediction> {
        let tokens = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| InferenceError::other(format!("tokenization failed: {}", e)))?;

        let probs = self
            .probabilities(&tokens)
            .map_err(|e| InferenceError::other(e.to_string()))?;

        pick_label(&probs, &self.id2label)
    }

    fn probabilities(&self, tokens: &Encoding) -> candle_core::Result<Vec<f32>> {
        let input_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = self.model.forward(&input_ids, &attention_mask)?;
        softmax(&logits, D::Minus1)?.squeeze(0)?.to_vec1::<f32>()
    }
}

#[async_trait]
impl SentimentModel for LocalClassifier {
    async fn predict(&self, text: &str) -> InferenceResult<Prediction> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();

        // Forward passes are CPU bound; keep them off the async workers.
        let prediction = tokio::task::spawn_blocking(move || inner.classify(&text))
            .await
            .map_err(|e| InferenceError::Panicked(e.to_string()))??;

        debug!(label = %prediction.label, score = prediction.score, "Local inference done");
        Ok(prediction)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn load_error(err: impl std::fmt::Display) -> SentiError {
    SentiError::model_load(err.to_string())
}

/// Read a checkpoint's `config.json`: the model config plus its label table.
///
/// The classifier head is rebuilt from `id2label` when the config does not
/// carry one of the matching size.
fn read_config(path: &Path) -> SentiResult<(Config, HashMap<String, String>)> {
    let raw = std::fs::read_to_string(path)?;

    let labels: LabelMap = serde_json::from_str(&raw)?;
    if labels.id2label.is_empty() {
        return Err(SentiError::model_load(format!(
            "{} has no id2label table",
            path.display()
        )));
    }

    let mut config: Config = serde_json::from_str(&raw)?;
    let head_matches = config
        .classifier_config
        .as_ref()
        .is_some_and(|c| c.id2label.len() == labels.id2label.len());
    if !head_matches {
        config.classifier_config = Some(ClassifierConfig {
            id2label: labels.id2label.clone(),
            label2id: labels
                .id2label
                .iter()
                .map(|(id, label)| (label.clone(), id.clone()))
                .collect(),
            classifier_pooling: ClassifierPooling::default(),
        });
    }

    Ok((config, labels.id2label))
}

/// Pick the most probable class and look up its label.
pub fn pick_label(
    probs: &[f32],
    id2label: &HashMap<String, String>,
) -> InferenceResult<Prediction> {
    let (id, score) = probs
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .ok_or_else(|| InferenceError::malformed("model produced no class scores"))?;

    let label = id2label.get(&id.to_string()).ok_or_else(|| {
        InferenceError::malformed(format!("predicted class {} has no label", id))
    })?;

    Ok(Prediction::new(label.clone(), score))
}
