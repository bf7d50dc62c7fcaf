//! Sentiment analysis route handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, warn};

use senti_core::{AnalysisResult, AnalyzeRequest};

use crate::state::AppState;

/// POST /analyze - Classify the `text` field of the body.
///
/// Always answers with an [`AnalysisResult`]. Failures, including bodies
/// that are not valid JSON objects, come back as a neutral label with an
/// `error` message and an error status.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> (StatusCode, Json<AnalysisResult>) {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(
                status = %rejection.status(),
                error = %rejection.body_text(),
                "Rejected analyze request"
            );
            return (
                rejection.status(),
                Json(AnalysisResult::degraded(rejection.body_text())),
            );
        }
    };

    let outcome = state.analyzer.analyze(req.text()).await;
    let status = if outcome.is_failure() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    let result = outcome.into_result();
    debug!(sentiment = %result.sentiment, %status, "Analyze request served");
    (status, Json(result))
}
