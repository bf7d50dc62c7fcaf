//! Application state.

use senti_core::Analyzer;

/// Application state shared across handlers.
///
/// Holds the analyzer, which wraps the model loaded at startup. Cloning is
/// cheap; the model itself sits behind an `Arc` and is never mutated.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self { analyzer }
    }
}
