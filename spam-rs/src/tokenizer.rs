//! Word extraction
//!
//! Turns raw message text into the set of distinct lower-case ASCII words
//! it contains. Only presence matters to the model, so repeated words
//! collapse into one entry.

use std::collections::BTreeSet;

/// Distinct normalized words of one document.
///
/// Ordered so that summing per-word evidence visits words in the same
/// order every time, which keeps scores bit-identical between runs.
pub type WordSet = BTreeSet<String>;

/// Extract the distinct words of `text`.
///
/// The whole text is lower-cased first (Unicode rules, so the Kelvin sign
/// becomes `k`), then every character that is not an ASCII letter acts as
/// a separator. Digits, punctuation and non-ASCII letters never appear in
/// a word.
pub fn extract_words(text: &str) -> WordSet {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
