//! Request, result and prediction types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of an analyze call.
///
/// `text` is optional; an absent field and an explicit `null` are both read
/// as empty text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }

    /// The request text, empty when missing.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// A lowercase sentiment label.
///
/// Deserialized labels go through [`Sentiment::from_label`], so a value read
/// back from a peer is lowercase too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Sentiment(String);

impl Sentiment {
    pub const NEUTRAL: &'static str = "neutral";

    /// Build a sentiment from a raw model label, normalizing case.
    pub fn from_label(label: &str) -> Self {
        Self(label.to_lowercase())
    }

    pub fn neutral() -> Self {
        Self(Self::NEUTRAL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_neutral(&self) -> bool {
        self.0 == Self::NEUTRAL
    }
}

impl From<String> for Sentiment {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        sentiment.0
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response body of an analyze call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    pub fn labeled(sentiment: Sentiment) -> Self {
        Self { sentiment, error: None }
    }

    pub fn neutral() -> Self {
        Self::labeled(Sentiment::neutral())
    }

    /// A degraded result: neutral label plus the failure description.
    pub fn degraded(error: impl Into<String>) -> Self {
        Self {
            sentiment: Sentiment::neutral(),
            error: Some(error.into()),
        }
    }
}

/// Raw output of an inference collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}
