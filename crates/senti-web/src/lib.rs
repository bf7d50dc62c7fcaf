//! Senti Web Server
//!
//! Axum-based HTTP surface for the sentiment service, plus a small client
//! for callers of that surface.

pub mod client;
pub mod routes;
pub mod state;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use senti_core::{Analyzer, SentimentModel, ServiceConfig};
use state::AppState;

pub use client::{article_text, matches_sentiment, SentimentClient};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analyze", post(routes::analyze::analyze))
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until Ctrl+C.
pub async fn run_server(
    model: Arc<dyn SentimentModel>,
    config: &ServiceConfig,
) -> anyhow::Result<()> {
    config.validate()?;

    let analyzer = Analyzer::with_max_chars(model, config.max_chars);
    let app = create_router(AppState::new(analyzer));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Sentiment service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Sentiment service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use senti_core::{InferenceError, InferenceResult, Prediction};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Answers with the number of characters it was given.
    struct EchoLength;

    #[async_trait]
    impl SentimentModel for EchoLength {
        async fn predict(&self, text: &str) -> InferenceResult<Prediction> {
            Ok(Prediction::new(format!("LEN{}", text.chars().count()), 1.0))
        }

        fn name(&self) -> &str {
            "echo-length"
        }
    }

    struct Fixed(&'static str);

    #[async_trait]
    impl SentimentModel for Fixed {
        async fn predict(&self, _text: &str) -> InferenceResult<Prediction> {
            Ok(Prediction::new(self.0, 0.99))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct Failing;

    #[async_trait]
    impl SentimentModel for Failing {
        async fn predict(&self, _text: &str) -> InferenceResult<Prediction> {
            Err(InferenceError::other("CUDA out of memory"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn app(model: impl SentimentModel + 'static) -> Router {
        create_router(AppState::new(Analyzer::new(Arc::new(model))))
    }

    fn analyze_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_empty_text_is_neutral() {
        for body in [r#"{"text": ""}"#, r#"{"text": "   "}"#, r#"{}"#, r#"{"text": null}"#] {
            let (status, json) = send(app(Failing), analyze_request(body)).await;
            assert_eq!(status, StatusCode::OK, "body: {}", body);
            assert_eq!(json, json!({"sentiment": "neutral"}), "body: {}", body);
        }
    }

    #[tokio::test]
    async fn test_label_is_lowercased() {
        let (status, json) = send(
            app(Fixed("POSITIVE")),
            analyze_request(r#"{"text": "I love this!"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"sentiment": "positive"}));
    }

    #[tokio::test]
    async fn test_long_text_is_truncated() {
        let body = json!({ "text": "a".repeat(1000) }).to_string();
        let (status, json) = send(app(EchoLength), analyze_request(&body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"sentiment": "len512"}));
    }

    #[tokio::test]
    async fn test_inference_failure_is_500() {
        let (status, json) = send(app(Failing), analyze_request(r#"{"text": "hello"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["sentiment"], "neutral");
        assert_eq!(json["error"], "Inference failed: CUDA out of memory");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (status, json) = send(app(Fixed("POSITIVE")), analyze_request("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["sentiment"], "neutral");
        assert!(!json["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_shape_is_422() {
        for body in [r#""just a string""#, r#"{"text": 42}"#, r#"{"text": ["a"]}"#] {
            let (status, json) = send(app(Fixed("POSITIVE")), analyze_request(body)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {}", body);
            assert_eq!(json["sentiment"], "neutral");
            assert!(json["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_415() {
        let req = Request::builder()
            .method("POST")
            .uri("/analyze")
            .body(Body::from(r#"{"text": "hello"}"#))
            .unwrap();
        let (status, json) = send(app(Fixed("POSITIVE")), req).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(json["sentiment"], "neutral");
    }

    #[tokio::test]
    async fn test_health_reports_model() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, json) = send(app(Fixed("POSITIVE")), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"status": "ok", "model": "fixed"}));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let req = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(header::ORIGIN, "http://news.example.com")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "hello"}"#))
            .unwrap();
        let response = app(Fixed("POSITIVE")).oneshot(req).await.unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_preflight() {
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/analyze")
            .header(header::ORIGIN, "http://news.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let response = app(Fixed("POSITIVE")).oneshot(req).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_run_server_rejects_bad_config() {
        let config = ServiceConfig {
            max_chars: 0,
            ..Default::default()
        };
        assert!(run_server(Arc::new(Fixed("POSITIVE")), &config).await.is_err());
    }
}
