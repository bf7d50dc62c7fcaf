//! # Senti Inference
//!
//! Sentiment models behind the [`senti_core::SentimentModel`] seam: a
//! pretrained model run in-process with candle, a remote text-classification
//! endpoint, and an offline lexicon classifier.

pub mod lexicon;
pub mod loader;
pub mod local;
pub mod remote;

pub use lexicon::LexiconClassifier;
pub use loader::load_model;
pub use local::LocalClassifier;
pub use remote::RemoteClassifier;
