//! Word-presence Bayesian model
//!
//! Counts, per class, how many training documents contain each word, then
//! scores a document by combining the smoothed per-word spam likelihoods
//! into a single probability.

use std::borrow::Borrow;
use std::collections::HashMap;

use super::types::{ClassificationResult, Document, Label};
use crate::tokenizer::{extract_words, WordSet};

/// Additive smoothing factor
pub const SMOOTHING: f64 = 0.8;

/// Per-word spam likelihoods are clamped into this range
const MIN_WORD_PROBABILITY: f64 = 0.0001;
const MAX_WORD_PROBABILITY: f64 = 0.9999;

/// Only words whose clamped likelihood lies strictly inside this band
/// contribute to the document score.
const INFORMATIVE_LOWER: f64 = 0.001;
const INFORMATIVE_UPPER: f64 = 0.999;

/// Trained frequency tables and document counters
#[derive(Debug, Clone, Default)]
pub struct SpamModel {
    ham_tokens: HashMap<String, u32>,
    spam_tokens: HashMap<String, u32>,
    ham_count: u32,
    spam_count: u32,
}

impl SpamModel {
    /// Create an untrained model
    pub fn new() -> Self {
        Self::default()
    }

    /// Train on a batch of ham and a batch of spam documents.
    ///
    /// Counts accumulate across calls.
    pub fn train<H, S, D, E>(&mut self, ham: H, spam: S)
    where
        H: IntoIterator<Item = D>,
        S: IntoIterator<Item = E>,
        D: Borrow<Document>,
        E: Borrow<Document>,
    {
        for doc in ham {
            self.train_document(doc.borrow(), Label::Ham);
        }
        for doc in spam {
            self.train_document(doc.borrow(), Label::Spam);
        }
    }

    /// Train on a single document
    pub fn train_document(&mut self, doc: &Document, label: Label) {
        self.learn(&extract_words(&doc.text), label);
    }

    /// Record one document's word set under `label`
    pub fn learn(&mut self, words: &WordSet, label: Label) {
        let (tokens, count) = match label {
            Label::Ham => (&mut self.ham_tokens, &mut self.ham_count),
            Label::Spam => (&mut self.spam_tokens, &mut self.spam_count),
        };

        *count += 1;
        for word in words {
            *tokens.entry(word.clone()).or_insert(0) += 1;
        }
    }

    /// Spam probability of a document given its word set.
    ///
    /// An empty set scores exactly 0.5.
    pub fn score(&self, words: &WordSet) -> f64 {
        let damping = (words.len() as f64).sqrt() + 1.0;
        let mut eta = 0.0f64;

        for word in words {
            let p = self
                .word_spam_probability(word)
                .clamp(MIN_WORD_PROBABILITY, MAX_WORD_PROBABILITY);

            if p > INFORMATIVE_LOWER && p < INFORMATIVE_UPPER {
                eta += ((1.0 - p).ln() - p.ln()) / damping;
            }
        }

        1.0 / (1.0 + eta.exp())
    }

    /// Spam probability of raw text
    pub fn score_text(&self, text: &str) -> f64 {
        self.score(&extract_words(text))
    }

    /// Unclamped P(spam | word) from the smoothed per-class frequencies
    pub fn word_spam_probability(&self, word: &str) -> f64 {
        let spam_docs = self.spam_frequency(word) as f64;
        let ham_docs = self.ham_frequency(word) as f64;

        let p_word_given_spam = (spam_docs + SMOOTHING) / (self.spam_count as f64 + 2.0 * SMOOTHING);
        let p_word_given_ham = (ham_docs + SMOOTHING) / (self.ham_count as f64 + 2.0 * SMOOTHING);

        p_word_given_spam / (p_word_given_spam + p_word_given_ham)
    }

    /// Score one labeled document
    pub fn classify(&self, doc: &Document, actual: Label) -> ClassificationResult {
        let probability = self.score_text(&doc.text);
        tracing::debug!(document = %doc.name, actual = %actual, probability, "Classified document");

        ClassificationResult {
            name: doc.name.clone(),
            probability,
            actual,
        }
    }

    /// Score a group of ham documents followed by a group of spam documents.
    ///
    /// Output order is every ham result in input order, then every spam
    /// result in input order.
    pub fn classify_batch<H, S, D, E>(&self, ham: H, spam: S) -> Vec<ClassificationResult>
    where
        H: IntoIterator<Item = D>,
        S: IntoIterator<Item = E>,
        D: Borrow<Document>,
        E: Borrow<Document>,
    {
        let mut results = self.classify_group(ham, Label::Ham);
        results.extend(self.classify_group(spam, Label::Spam));
        results
    }

    /// Score every document of one labeled group, preserving order
    pub fn classify_group<I, D>(&self, docs: I, actual: Label) -> Vec<ClassificationResult>
    where
        I: IntoIterator<Item = D>,
        D: Borrow<Document>,
    {
        docs.into_iter()
            .map(|doc| self.classify(doc.borrow(), actual))
            .collect()
    }

    /// Number of ham training documents containing `word`
    pub fn ham_frequency(&self, word: &str) -> u32 {
        self.ham_tokens.get(word).copied().unwrap_or(0)
    }

    /// Number of spam training documents containing `word`
    pub fn spam_frequency(&self, word: &str) -> u32 {
        self.spam_tokens.get(word).copied().unwrap_or(0)
    }

    /// Get training counts as (ham, spam)
    pub fn training_counts(&self) -> (u32, u32) {
        (self.ham_count, self.spam_count)
    }

    /// Number of distinct words seen in any training document
    pub fn vocabulary_size(&self) -> usize {
        self.ham_tokens.len()
            + self
                .spam_tokens
                .keys()
                .filter(|token| !self.ham_tokens.contains_key(*token))
                .count()
    }

    pub fn is_trained(&self) -> bool {
        self.ham_count > 0 || self.spam_count > 0
    }

    /// All tokens as (token, ham_count, spam_count), sorted by token
    pub fn tokens(&self) -> Vec<(String, u32, u32)> {
        let mut result: Vec<(String, u32, u32)> = self
            .ham_tokens
            .iter()
            .map(|(token, &ham)| (token.clone(), ham, self.spam_frequency(token)))
            .collect();

        for (token, &spam) in &self.spam_tokens {
            if !self.ham_tokens.contains_key(token) {
                result.push((token.clone(), 0, spam));
            }
        }

        result.sort_by(|a, b| a.0.cmp(&b.0));
        result
    }

    /// Rebuild a model from persisted tables.
    ///
    /// Zero counts are not stored, matching a model built by training.
    pub fn from_parts(tokens: Vec<(String, u32, u32)>, ham_count: u32, spam_count: u32) -> Self {
        let mut model = Self {
            ham_count,
            spam_count,
            ..Self::default()
        };

        for (token, ham, spam) in tokens {
            if ham > 0 {
                model.ham_tokens.insert(token.clone(), ham);
            }
            if spam > 0 {
                model.spam_tokens.insert(token, spam);
            }
        }

        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<Document> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Document::new(format!("{:04}.txt", i), *text))
            .collect()
    }

    fn words(items: &[&str]) -> WordSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counts_presence_not_repetition() {
        let mut model = SpamModel::new();
        let ham = docs(&["free free free lunch", "free", "FREE! free?"]);
        let spam = docs(&["free free money", "get it free free free free"]);
        model.train(&ham, &spam);

        assert_eq!(model.ham_frequency("free"), 3);
        assert_eq!(model.spam_frequency("free"), 2);
        assert_eq!(model.ham_frequency("lunch"), 1);
        assert_eq!(model.spam_frequency("lunch"), 0);
        assert_eq!(model.training_counts(), (3, 2));
    }

    #[test]
    fn test_training_accumulates() {
        let mut model = SpamModel::new();
        model.train(&docs(&["project meeting"]), &docs(&["cheap pills"]));
        model.train(&docs(&["meeting agenda"]), Vec::<Document>::new());

        assert_eq!(model.training_counts(), (2, 1));
        assert_eq!(model.ham_frequency("meeting"), 2);
        assert_eq!(model.vocabulary_size(), 5);
    }

    #[test]
    fn test_empty_document_counts_as_document() {
        let mut model = SpamModel::new();
        model.train(&docs(&["", "12345"]), &docs(&[]));
        assert_eq!(model.training_counts(), (2, 0));
        assert_eq!(model.vocabulary_size(), 0);
    }

    #[test]
    fn test_empty_word_set_scores_half() {
        let model = SpamModel::new();
        assert_eq!(model.score(&WordSet::new()), 0.5);

        let mut trained = SpamModel::new();
        trained.train(&docs(&["hello"]), &docs(&["buy"]));
        assert_eq!(trained.score(&WordSet::new()), 0.5);
        assert_eq!(trained.score_text("!!! 123"), 0.5);
    }

    #[test]
    fn test_unseen_word_with_balanced_counts_is_neutral() {
        let mut model = SpamModel::new();
        model.train(&docs(&["hello team"]), &docs(&["buy pills"]));

        let p = model.word_spam_probability("zebra");
        assert_eq!(p, 0.5);
        assert_eq!(model.score(&words(&["zebra", "yak"])), 0.5);
    }

    #[test]
    fn test_untrained_model_scores_are_finite() {
        let model = SpamModel::new();
        let p = model.score(&words(&["anything", "at", "all"]));
        assert!(p.is_finite());
        assert_eq!(p, 0.5);
    }

    #[test]
    fn test_unseen_word_with_unbalanced_counts_is_finite() {
        let mut model = SpamModel::new();
        model.train(&docs(&["a", "b", "c", "d"]), &docs(&["e"]));
        let p = model.score(&words(&["unseen"]));
        assert!(p.is_finite());
        assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn test_spam_only_word_outscores_ham_only_word() {
        let mut model = SpamModel::new();
        model.train(&docs(&["meeting notes"]), &docs(&["buy now", "free money"]));

        let free = model.score(&words(&["free"]));
        let meeting = model.score(&words(&["meeting"]));
        assert!(free > meeting, "free={} meeting={}", free, meeting);
        assert!(free > 0.5);
        assert!(meeting < 0.5);
    }

    #[test]
    fn test_score_matches_formula() {
        // ham: 2 docs, spam: 1 doc; "free" appears in one ham doc only
        let mut model = SpamModel::new();
        model.train(&docs(&["buy now", "free money"]), &docs(&["meeting notes"]));

        let p_ws = (0.0 + 0.8) / (1.0 + 1.6);
        let p_wh = (1.0 + 0.8) / (2.0 + 1.6);
        let p_sw: f64 = p_ws / (p_ws + p_wh);
        let eta = ((1.0 - p_sw).ln() - p_sw.ln()) / (1.0f64.sqrt() + 1.0);
        let expected = 1.0 / (1.0 + eta.exp());

        let actual = model.score(&words(&["free"]));
        assert!((actual - expected).abs() < 1e-12);
        // "meeting" only ever appeared in spam, so it leans spam here
        assert!(model.score(&words(&["meeting"])) > actual);
    }

    #[test]
    fn test_extreme_words_are_skipped() {
        let mut model = SpamModel::new();
        let spam: Vec<Document> = (0..2000)
            .map(|i| Document::new(format!("s{}", i), "viagra"))
            .collect();
        let ham: Vec<Document> = (0..2000)
            .map(|i| Document::new(format!("h{}", i), "lunch"))
            .collect();
        model.train(&ham, &spam);

        // P(spam|viagra) is above 0.999, so it lies outside the band
        assert!(model.word_spam_probability("viagra") >= 0.999);
        assert_eq!(model.score(&words(&["viagra"])), 0.5);
        assert_eq!(model.score(&words(&["lunch"])), 0.5);
    }

    #[test]
    fn test_damping_uses_word_set_size() {
        let mut model = SpamModel::new();
        model.train(&docs(&["hello"]), &docs(&["prize"]));

        let single = model.score(&words(&["prize"]));
        // an unseen word is neutral here but still enlarges the damping term
        let diluted = model.score(&words(&["prize", "unseen", "other", "more"]));
        assert!(single > diluted);
        assert!(diluted > 0.5);
    }

    #[test]
    fn test_classify_batch_orders_ham_then_spam() {
        let mut model = SpamModel::new();
        model.train(&docs(&["lunch meeting"]), &docs(&["win prize"]));

        let ham = vec![Document::new("h2", "lunch"), Document::new("h1", "meeting")];
        let spam = vec![Document::new("s9", "prize"), Document::new("s1", "win")];
        let results = model.classify_batch(&ham, &spam);

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["h2", "h1", "s9", "s1"]);
        assert_eq!(results[0].actual, Label::Ham);
        assert_eq!(results[3].actual, Label::Spam);
    }

    #[test]
    fn test_classify_batch_is_idempotent() {
        let mut model = SpamModel::new();
        model.train(
            &docs(&["quarterly report attached", "lunch tomorrow"]),
            &docs(&["you won a free cruise", "cheap meds online now"]),
        );

        let ham = docs(&["report for lunch", "see attached"]);
        let spam = docs(&["free cruise now", "meds"]);
        let first = model.classify_batch(&ham, &spam);
        let second = model.classify_batch(&ham, &spam);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.probability.to_bits(), b.probability.to_bits());
        }
    }

    #[test]
    fn test_tokens_round_trip_through_parts() {
        let mut model = SpamModel::new();
        model.train(&docs(&["alpha beta", "beta"]), &docs(&["beta gamma"]));

        let tokens = model.tokens();
        assert_eq!(
            tokens,
            vec![
                ("alpha".to_string(), 1, 0),
                ("beta".to_string(), 2, 1),
                ("gamma".to_string(), 0, 1),
            ]
        );

        let (ham, spam) = model.training_counts();
        let restored = SpamModel::from_parts(tokens, ham, spam);
        let sample = words(&["alpha", "gamma", "delta"]);
        assert_eq!(restored.score(&sample).to_bits(), model.score(&sample).to_bits());
        assert_eq!(restored.vocabulary_size(), 3);
    }
}
