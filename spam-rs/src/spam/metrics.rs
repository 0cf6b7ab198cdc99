//! Accuracy and precision over a batch of classification results

use serde::{Deserialize, Serialize};

use super::types::{ClassificationResult, Label};

/// Summary metrics of one evaluation batch, both as percentages
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub precision: f64,
}

impl Metrics {
    /// Compute both metrics over `results`
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        Self {
            accuracy: accuracy(results),
            precision: precision(results),
        }
    }
}

/// Percentage of results whose prediction matches the actual label.
///
/// Returns 0.0 for an empty batch.
pub fn accuracy(results: &[ClassificationResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }

    let correct = results
        .iter()
        .filter(|r| r.flagged_spam() == (r.actual == Label::Spam))
        .count();

    correct as f64 / results.len() as f64 * 100.0
}

/// Percentage of predicted-spam results that really are spam.
///
/// Returns 0.0 when nothing was predicted spam.
pub fn precision(results: &[ClassificationResult]) -> f64 {
    let (true_positives, false_positives) = results
        .iter()
        .filter(|r| r.flagged_spam())
        .fold((0usize, 0usize), |(tp, fp), r| match r.actual {
            Label::Spam => (tp + 1, fp),
            Label::Ham => (tp, fp + 1),
        });

    let predicted = true_positives + false_positives;
    if predicted == 0 {
        return 0.0;
    }

    true_positives as f64 / predicted as f64 * 100.0
}
