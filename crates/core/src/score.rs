//! Heuristic content quality score.
//!
//! Combines raw length (full credit at 1000 words) and average sentence
//! length (full credit at 20 words per sentence), each worth half.
//! Sentences are counted naively as the number of `.` characters plus one,
//! so abbreviations and decimals skew the count.

const WORDS_FOR_FULL_LENGTH: f64 = 1000.0;
const WORDS_PER_SENTENCE_CAP: f64 = 20.0;

/// Score `text` in `[0.0, 1.0]`, rounded to two decimals.
///
/// Empty text and text without any `.` score `0.0`.
pub fn quality_score(text: &str) -> f64 {
    if text.is_empty() || !text.contains('.') {
        return 0.0;
    }

    let words = text.split_whitespace().count() as f64;
    let sentences = text.split('.').count() as f64;
    let avg_sentence_length = words / sentences;

    let score = ((words / WORDS_FOR_FULL_LENGTH) * 0.5
        + (avg_sentence_length.min(WORDS_PER_SENTENCE_CAP) / WORDS_PER_SENTENCE_CAP) * 0.5)
        .min(1.0);

    round_two_decimals(score)
}

/// Round on the exact decimal value of `value`, ties to even.
///
/// `(x * 100.0).round()` rounds the already inexact product, so values such
/// as `0.08499999999999999` would come out as `0.09`.
fn round_two_decimals(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
