//! Senti Core Library
//!
//! Domain types, the inference-collaborator trait and the analysis boundary
//! for the senti sentiment service.

pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod error;
pub mod model;

pub use analyzer::{Analyzer, Outcome, DEFAULT_MAX_CHARS};
pub use classifier::SentimentModel;
pub use config::{BackendConfig, ServiceConfig};
pub use error::{InferenceError, InferenceResult, SentiError, SentiResult};
pub use model::{AnalysisResult, AnalyzeRequest, Prediction, Sentiment};
