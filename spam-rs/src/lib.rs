//! spam-rs: Bayesian spam/ham classifier
//!
//! Learns which words appear in spam and in legitimate mail from labeled
//! example corpora, then scores unseen messages and reports accuracy and
//! precision against held-out labeled corpora.
//!
//! # Features
//!
//! - **Tokenizer**: lower-cased, ASCII-letter word sets
//! - **Model**: smoothed per-word likelihoods combined through a logistic
//!   eta-sum
//! - **Corpora**: one-file-per-message directories and MBOX files
//! - **Evaluation**: ordered per-document results plus accuracy/precision
//! - **Snapshots**: JSON persistence of a trained model
//!
//! # Example
//!
//! ```no_run
//! use spam_rs::config::CorpusConfig;
//! use spam_rs::detector::SpamDetector;
//!
//! let mut detector = SpamDetector::new(CorpusConfig::default());
//! detector.train_from_dir("data/train");
//!
//! let report = detector.test_from_dir("data/test");
//! println!(
//!     "accuracy {:.2}%, precision {:.2}%",
//!     report.metrics.accuracy, report.metrics.precision
//! );
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`]: Word extraction
//! - [`spam`]: Model, results, metrics and snapshots
//! - [`corpus`]: Directory and MBOX document sources
//! - [`detector`]: Training and evaluation over corpora
//! - [`config`]: Configuration management
//! - [`output`]: Report rendering
//! - [`worker`]: Background execution of passes
//! - [`error`]: Error types and handling

pub mod config;
pub mod corpus;
pub mod detector;
pub mod error;
pub mod output;
pub mod spam;
pub mod tokenizer;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use detector::{EvaluationReport, SpamDetector, TrainingSummary};
pub use error::{Result, SpamError};
pub use spam::{ClassificationResult, Document, Label, Metrics, SpamModel};
pub use tokenizer::{extract_words, WordSet};
