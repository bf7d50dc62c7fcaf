//! Terminal output formatting.

use colored::{ColoredString, Colorize};

use senti_core::Sentiment;

/// Color a label by polarity.
fn colored_label(sentiment: &Sentiment) -> ColoredString {
    match sentiment.as_str() {
        "positive" => sentiment.as_str().green().bold(),
        "negative" => sentiment.as_str().red().bold(),
        "neutral" => sentiment.as_str().dimmed(),
        other => other.yellow(),
    }
}

/// Print a sentiment label on stdout.
pub fn print_sentiment(sentiment: &Sentiment) {
    println!("{}", colored_label(sentiment));
}

/// Print a failure message on stderr.
pub fn print_failure(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}
