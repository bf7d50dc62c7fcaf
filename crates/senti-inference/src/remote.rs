//! HTTP client for a hosted text-classification model.
//!
//! Speaks the Hugging Face inference protocol: `POST {"inputs": text}` and a
//! list of `{label, score}` candidates back, either flat (text-embeddings-
//! inference `/predict`) or nested one level (hosted inference API).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use senti_core::{InferenceError, InferenceResult, Prediction, SentimentModel};

/// Default hosted inference API URL.
pub const DEFAULT_REMOTE_URL: &str = "https://api-inference.huggingface.co";

/// Default model, the standard English sentiment-analysis checkpoint.
pub const DEFAULT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Remote text-classification client.
#[derive(Clone)]
pub struct RemoteClassifier {
    endpoint: String,
    base_url: String,
    name: String,
    api_token: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<Prediction>>),
    Flat(Vec<Prediction>),
}

impl ClassifyResponse {
    fn into_candidates(self) -> Vec<Prediction> {
        match self {
            ClassifyResponse::Nested(batches) => batches.into_iter().flatten().collect(),
            ClassifyResponse::Flat(candidates) => candidates,
        }
    }
}

impl RemoteClassifier {
    /// Create a client for `base_url`.
    ///
    /// With a model id the request goes to `{base_url}/models/{model}`,
    /// otherwise straight to `base_url`.
    pub fn new(
        base_url: &str,
        model: Option<&str>,
        api_token: Option<&str>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        let base_url = base_url.trim_end_matches('/').to_string();
        let (endpoint, name) = match model {
            Some(model) => (format!("{}/models/{}", base_url, model), model.to_string()),
            None => (base_url.clone(), base_url.clone()),
        };

        Self {
            endpoint,
            base_url,
            name,
            api_token: api_token.filter(|t| !t.is_empty()).map(str::to_string),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check whether the inference host answers at all.
    pub async fn health_check(&self) -> bool {
        match self.client.get(&self.base_url).send().await {
            Ok(resp) => !resp.status().is_server_error(),
            Err(e) => {
                debug!(error = %e, url = %self.base_url, "Inference host unreachable");
                false
            }
        }
    }
}

#[async_trait]
impl SentimentModel for RemoteClassifier {
    async fn predict(&self, text: &str) -> InferenceResult<Prediction> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest { inputs: text });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InferenceError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ClassifyResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::malformed(e.to_string()))?;

        let candidates = parsed.into_candidates();
        debug!(candidates = candidates.len(), "Received classification");

        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| InferenceError::malformed("no labels in model response"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(url: &str, model: Option<&str>) -> RemoteClassifier {
        RemoteClassifier::new(url, model, None, Duration::from_secs(5))
    }

    #[test]
    fn test_endpoint_building() {
        let c = client("http://host:8080/", Some("org/model"));
        assert_eq!(c.endpoint(), "http://host:8080/models/org/model");
        assert_eq!(c.name(), "org/model");

        let c = client("http://host:8080/predict", None);
        assert_eq!(c.endpoint(), "http://host:8080/predict");
    }

    #[tokio::test]
    async fn test_flat_response_picks_best() {
        let router = Router::new().route(
            "/predict",
            post(|| async {
                Json(json!([
                    {"label": "NEGATIVE", "score": 0.1},
                    {"label": "POSITIVE", "score": 0.9}
                ]))
            }),
        );
        let url = spawn_upstream(router).await;

        let prediction = client(&format!("{}/predict", url), None)
            .predict("great")
            .await
            .unwrap();
        assert_eq!(prediction.label, "POSITIVE");
    }

    #[tokio::test]
    async fn test_nested_response_and_request_body() {
        let router = Router::new().route(
            "/models/sst2",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({"inputs": "terrible"}));
                Json(json!([[
                    {"label": "NEGATIVE", "score": 0.97},
                    {"label": "POSITIVE", "score": 0.03}
                ]]))
            }),
        );
        let url = spawn_upstream(router).await;

        let prediction = client(&url, Some("sst2")).predict("terrible").await.unwrap();
        assert_eq!(prediction.label, "NEGATIVE");
        assert!((prediction.score - 0.97).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        let router = Router::new().route(
            "/predict",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model loading") }),
        );
        let url = spawn_upstream(router).await;

        let err = client(&format!("{}/predict", url), None)
            .predict("hi")
            .await
            .unwrap_err();
        match err {
            InferenceError::Upstream { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "model loading");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_or_garbled_response_is_malformed() {
        let router = Router::new()
            .route("/empty", post(|| async { Json(json!([])) }))
            .route("/garbled", post(|| async { Json(json!({"oops": true})) }));
        let url = spawn_upstream(router).await;

        let err = client(&format!("{}/empty", url), None).predict("hi").await.unwrap_err();
        assert!(matches!(err, InferenceError::MalformedOutput(_)));

        let err = client(&format!("{}/garbled", url), None).predict("hi").await.unwrap_err();
        assert!(matches!(err, InferenceError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let c = client(&format!("http://{}", addr), None);
        let err = c.predict("hi").await.unwrap_err();
        assert!(matches!(err, InferenceError::Unavailable(_)));
        assert!(!c.health_check().await);
    }
}
