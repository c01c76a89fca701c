//! Simulated human typing latency.
//!
//! The synchronous design waits for the complete customer reply and then
//! delays delivery in proportion to its length, so the trainee experiences
//! a plausible typing rhythm instead of an instant wall of text.

use std::time::Duration;

/// Seconds of simulated typing per word of reply.
pub const SECONDS_PER_WORD: f64 = 0.2;

/// Lower clamp of the simulated delay.
pub const MIN_DELAY_SECS: f64 = 0.5;

/// Upper clamp of the simulated delay.
pub const MAX_DELAY_SECS: f64 = 8.0;

/// Computes the delay for a reply of `word_count` words:
/// `clamp(words * 0.2s, 0.5s, 8.0s)`.
pub fn typing_delay(word_count: usize) -> Duration {
    let secs = (word_count as f64 * SECONDS_PER_WORD).clamp(MIN_DELAY_SECS, MAX_DELAY_SECS);
    Duration::from_secs_f64(secs)
}

/// Word count as seen by the delay computation.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
