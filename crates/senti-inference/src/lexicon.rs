//! Offline word-list sentiment classifier.
//!
//! Counts positive and negative words, flipping polarity for a word that
//! follows a negator within a short window ("not good", "never liked").

use async_trait::async_trait;
use std::collections::HashSet;

use senti_core::{InferenceResult, Prediction, SentimentModel};

/// How many tokens a negator reaches forward.
const NEGATION_WINDOW: usize = 3;

/// Lexicon-based sentiment classifier.
pub struct LexiconClassifier {
    positive_words: HashSet<&'static str>,
    negative_words: HashSet<&'static str>,
    negators: HashSet<&'static str>,
}

/// Word counts behind a classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub positive: usize,
    pub negative: usize,
}

impl LexiconClassifier {
    pub fn new() -> Self {
        Self {
            positive_words: Self::build_positive_lexicon(),
            negative_words: Self::build_negative_lexicon(),
            negators: Self::build_negators(),
        }
    }

    /// Count polarity words in `text`.
    pub fn tally(&self, text: &str) -> Tally {
        // Typographic apostrophes would otherwise split "didn’t" into two tokens.
        let lower = text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'");
        let tokens = lower
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .map(|t| t.trim_matches('\''))
            .filter(|t| !t.is_empty());

        let mut tally = Tally::default();
        let mut negated_for = 0usize;

        for token in tokens {
            if self.negators.contains(token) {
                negated_for = NEGATION_WINDOW;
                continue;
            }

            let polarity = if self.positive_words.contains(token) {
                Some(true)
            } else if self.negative_words.contains(token) {
                Some(false)
            } else {
                None
            };

            if let Some(positive) = polarity {
                if positive != (negated_for > 0) {
                    tally.positive += 1;
                } else {
                    tally.negative += 1;
                }
                negated_for = 0;
            } else {
                negated_for = negated_for.saturating_sub(1);
            }
        }

        tally
    }

    /// Classify text into POSITIVE, NEGATIVE or NEUTRAL.
    pub fn classify(&self, text: &str) -> Prediction {
        let tally = self.tally(text);
        let total = tally.positive + tally.negative;

        if total == 0 || tally.positive == tally.negative {
            return Prediction::new("NEUTRAL", 0.5);
        }

        let (label, hits) = if tally.positive > tally.negative {
            ("POSITIVE", tally.positive)
        } else {
            ("NEGATIVE", tally.negative)
        };

        Prediction::new(label, hits as f32 / total as f32)
    }

    fn build_positive_lexicon() -> HashSet<&'static str> {
        [
            // Approval
            "good", "great", "excellent", "amazing", "awesome", "fantastic",
            "wonderful", "brilliant", "outstanding", "superb", "perfect", "nice",
            "best", "better", "fine", "impressive", "remarkable",

            // Feeling
            "love", "loved", "loves", "like", "liked", "enjoy", "enjoyed",
            "happy", "glad", "pleased", "delighted", "excited", "thrilled",
            "grateful", "thankful", "hopeful", "optimistic", "proud",

            // Outcomes
            "win", "wins", "won", "success", "successful", "succeed", "gain",
            "gains", "growth", "improve", "improved", "improvement", "recover",
            "recovery", "breakthrough", "record", "rally", "surge", "boost",
            "strong", "stronger", "beat", "praise", "praised", "celebrate",

            // Qualities
            "safe", "secure", "stable", "helpful", "easy", "fast", "beautiful",
            "fun", "peace", "hope", "benefit", "benefits", "positive",
        ]
        .into_iter()
        .collect()
    }

    fn build_negative_lexicon() -> HashSet<&'static str> {
        [
            // Disapproval
            "bad", "terrible", "awful", "horrible", "poor", "worst", "worse",
            "disappointing", "disappointed", "mediocre", "useless", "broken",

            // Feeling
            "hate", "hated", "hates", "dislike", "sad", "angry", "upset",
            "afraid", "fear", "fears", "worried", "worry", "annoyed",
            "frustrated", "furious", "miserable", "pessimistic",

            // Outcomes
            "lose", "loss", "losses", "lost", "fail", "failed", "failure",
            "decline", "declined", "drop", "dropped", "fall", "fell", "crash",
            "slump", "plunge", "weak", "weaker", "recession", "bankrupt",
            "layoffs", "cut", "cuts",

            // Harm
            "crisis", "disaster", "death", "dead", "killed", "war", "attack",
            "violence", "scandal", "fraud", "corrupt", "danger", "dangerous",
            "threat", "risk", "slow", "problem", "problems", "negative",
        ]
        .into_iter()
        .collect()
    }

    fn build_negators() -> HashSet<&'static str> {
        [
            "not", "no", "never", "neither", "nor", "without", "hardly",
            "don't", "doesn't", "didn't", "isn't", "wasn't", "aren't",
            "weren't", "won't", "can't", "cannot", "shouldn't", "wouldn't",
        ]
        .into_iter()
        .collect()
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentModel for LexiconClassifier {
    async fn predict(&self, text: &str) -> InferenceResult<Prediction> {
        Ok(self.classify(text))
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let c = LexiconClassifier::new();
        let p = c.classify("I love this! The new release is great.");
        assert_eq!(p.label, "POSITIVE");
        assert!((p.score - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_negative_text() {
        let c = LexiconClassifier::new();
        let p = c.classify("Markets crash as recession fears grow");
        assert_eq!(p.label, "NEGATIVE");
    }

    #[test]
    fn test_no_signal_is_neutral() {
        let c = LexiconClassifier::new();
        let p = c.classify("The committee meets on Tuesday.");
        assert_eq!(p.label, "NEUTRAL");
        assert_eq!(p.score, 0.5);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let c = LexiconClassifier::new();
        assert_eq!(c.tally("this is not good"), Tally { positive: 0, negative: 1 });
        assert_eq!(c.tally("I don't hate it"), Tally { positive: 1, negative: 0 });
        assert_eq!(c.classify("Not bad at all, honestly").label, "POSITIVE");
    }

    #[test]
    fn test_typographic_apostrophe_negates() {
        let c = LexiconClassifier::new();
        assert_eq!(c.tally("I didn\u{2019}t like it"), Tally { positive: 0, negative: 1 });
        assert_eq!(c.classify("I didn’t like it").label, "NEGATIVE");
        assert_eq!(c.classify("We won‘t see good times").label, "NEGATIVE");
        assert_eq!(c.classify("‘Great’ says the reviewer").label, "POSITIVE");
    }

    #[test]
    fn test_negation_window_expires() {
        let c = LexiconClassifier::new();
        // Four filler words put "good" outside the negator's reach.
        assert_eq!(
            c.tally("not that it matters much, good work"),
            Tally { positive: 1, negative: 0 }
        );
    }

    #[test]
    fn test_mixed_counts() {
        let c = LexiconClassifier::new();
        let p = c.classify("Great camera, terrible battery, awful screen");
        assert_eq!(p.label, "NEGATIVE");
        assert!((p.score - 2.0 / 3.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_model_trait() {
        let c = LexiconClassifier::new();
        assert_eq!(c.name(), "lexicon");
        let p = c.predict("what a wonderful day").await.unwrap();
        assert_eq!(p.label, "POSITIVE");
    }
}
