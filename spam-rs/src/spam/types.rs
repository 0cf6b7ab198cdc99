//! Spam types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tokenizer::{extract_words, WordSet};

/// Probability at which a document is displayed as spam.
///
/// Metrics count a document as predicted spam only strictly above this
/// value; see [`ClassificationResult::flagged_spam`].
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Class label of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Legitimate mail
    Ham,
    /// Unsolicited mail
    Spam,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ham => "ham",
            Label::Spam => "spam",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A message to train on or classify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Identifying name (file name, or `file#n` for MBOX messages)
    pub name: String,
    /// Raw text content
    pub text: String,
}

impl Document {
    /// Create a new document
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Distinct words of this document
    pub fn words(&self) -> WordSet {
        extract_words(&self.text)
    }
}

/// Outcome of scoring one labeled test document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Document name
    pub name: String,
    /// Computed spam probability in [0, 1]
    pub probability: f64,
    /// Ground-truth label
    pub actual: Label,
}

impl ClassificationResult {
    /// Label shown to users: spam when `probability >= 0.5`
    pub fn predicted_label(&self) -> Label {
        if self.probability >= DECISION_THRESHOLD {
            Label::Spam
        } else {
            Label::Ham
        }
    }

    /// Whether metrics count this document as a positive (`probability > 0.5`)
    pub fn flagged_spam(&self) -> bool {
        self.probability > DECISION_THRESHOLD
    }
}
