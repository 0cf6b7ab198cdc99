//! Training and evaluation over labeled corpora
//!
//! [`SpamDetector`] wires corpus sources to a [`SpamModel`]: it trains from
//! a root holding `ham/`, `ham2/` and `spam/` sub-directories and evaluates
//! against a root holding `ham/` and `spam/` (names come from
//! [`CorpusConfig`]).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::CorpusConfig;
use crate::corpus::{open_source, SkippedSource};
use crate::spam::{ClassificationResult, Document, Label, Metrics, SpamModel};

/// Outcome of one training pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Ham documents learned in this pass
    pub ham_documents: u32,
    /// Spam documents learned in this pass
    pub spam_documents: u32,
    /// Sources that could not be read
    pub skipped: Vec<SkippedSource>,
}

/// Outcome of one test pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Ham results first, then spam results
    pub results: Vec<ClassificationResult>,
    pub metrics: Metrics,
    /// Sources that could not be read
    pub skipped: Vec<SkippedSource>,
    /// Training pass that preceded this test, when run together
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training: Option<TrainingSummary>,
}

impl EvaluationReport {
    /// Build a report, computing metrics from `results`
    pub fn new(results: Vec<ClassificationResult>, skipped: Vec<SkippedSource>) -> Self {
        let metrics = Metrics::from_results(&results);
        Self {
            results,
            metrics,
            skipped,
            training: None,
        }
    }

    /// Attach the summary of the training pass behind this report
    pub fn with_training(mut self, training: TrainingSummary) -> Self {
        self.training = Some(training);
        self
    }
}

/// Spam detector: a model plus the corpus layout it trains and tests on
#[derive(Debug, Clone, Default)]
pub struct SpamDetector {
    layout: CorpusConfig,
    model: SpamModel,
}

impl SpamDetector {
    /// Create a detector with an untrained model
    pub fn new(layout: CorpusConfig) -> Self {
        Self::with_model(layout, SpamModel::new())
    }

    /// Create a detector around an existing model
    pub fn with_model(layout: CorpusConfig, model: SpamModel) -> Self {
        Self { layout, model }
    }

    /// Get the model
    pub fn model(&self) -> &SpamModel {
        &self.model
    }

    /// Take the model out of the detector
    pub fn into_model(self) -> SpamModel {
        self.model
    }

    /// Get the corpus layout
    pub fn layout(&self) -> &CorpusConfig {
        &self.layout
    }

    /// Train from the configured ham and spam sub-directories of `root`
    pub fn train_from_dir<P: AsRef<Path>>(&mut self, root: P) -> TrainingSummary {
        let root = root.as_ref();
        let ham = join_all(root, &self.layout.train_ham_dirs);
        let spam = join_all(root, &self.layout.train_spam_dirs);
        self.train_sources(&ham, &spam)
    }

    /// Train from explicit ham and spam sources (directories or MBOX files)
    pub fn train_sources<P: AsRef<Path>>(&mut self, ham: &[P], spam: &[P]) -> TrainingSummary {
        let mut summary = TrainingSummary::default();

        for path in ham {
            summary.ham_documents += self.train_source(path.as_ref(), Label::Ham, &mut summary.skipped);
        }
        for path in spam {
            summary.spam_documents += self.train_source(path.as_ref(), Label::Spam, &mut summary.skipped);
        }

        let (total_ham, total_spam) = self.model.training_counts();
        info!(
            "Training complete: {} ham, {} spam learned ({} ham, {} spam total, {} words, {} skipped)",
            summary.ham_documents,
            summary.spam_documents,
            total_ham,
            total_spam,
            self.model.vocabulary_size(),
            summary.skipped.len()
        );

        summary
    }

    fn train_source(&mut self, path: &Path, label: Label, skipped: &mut Vec<SkippedSource>) -> u32 {
        let mut source = open_source(path);
        let mut learned = 0;

        for doc in source.by_ref() {
            self.model.train_document(&doc, label);
            learned += 1;
        }

        skipped.extend(source.take_skipped());
        info!("Learned {} {} documents from {}", learned, label, path.display());
        learned
    }

    /// Classify the configured test sub-directories of `root`
    pub fn test_from_dir<P: AsRef<Path>>(&self, root: P) -> EvaluationReport {
        let root = root.as_ref();
        self.test_sources(
            root.join(&self.layout.test_ham_dir),
            root.join(&self.layout.test_spam_dir),
        )
    }

    /// Classify an explicit ham source then an explicit spam source
    pub fn test_sources<P: AsRef<Path>, Q: AsRef<Path>>(&self, ham: P, spam: Q) -> EvaluationReport {
        let mut skipped = Vec::new();
        let mut results = self.classify_source(ham.as_ref(), Label::Ham, &mut skipped);
        results.extend(self.classify_source(spam.as_ref(), Label::Spam, &mut skipped));

        let report = EvaluationReport::new(results, skipped);
        info!(
            "Testing complete: {} documents, accuracy {:.2}%, precision {:.2}% ({} skipped)",
            report.results.len(),
            report.metrics.accuracy,
            report.metrics.precision,
            report.skipped.len()
        );
        report
    }

    fn classify_source(
        &self,
        path: &Path,
        actual: Label,
        skipped: &mut Vec<SkippedSource>,
    ) -> Vec<ClassificationResult> {
        let mut source = open_source(path);
        let results = self.model.classify_group(source.by_ref(), actual);
        skipped.extend(source.take_skipped());
        results
    }

    /// Spam probability of a single unlabeled message
    pub fn classify_text(&self, text: &str) -> f64 {
        self.model.score_text(text)
    }

    /// Spam probability of an unlabeled document
    pub fn classify_document(&self, doc: &Document) -> f64 {
        self.model.score(&doc.words())
    }
}

fn join_all(root: &Path, names: &[String]) -> Vec<PathBuf> {
    names.iter().map(|name| root.join(name)).collect()
}
