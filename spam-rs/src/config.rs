//! Configuration for spam-rs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SpamError};

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Corpus directory layout
    #[serde(default)]
    pub corpus: CorpusConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Names of the labeled sub-directories under a training or test root
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Ham directories under the training root
    #[serde(default = "default_train_ham_dirs")]
    pub train_ham_dirs: Vec<String>,
    /// Spam directories under the training root
    #[serde(default = "default_train_spam_dirs")]
    pub train_spam_dirs: Vec<String>,
    /// Ham directory under the test root
    #[serde(default = "default_ham_dir")]
    pub test_ham_dir: String,
    /// Spam directory under the test root
    #[serde(default = "default_spam_dir")]
    pub test_spam_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (e.g. "info", "spam_rs=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
    /// One of "pretty", "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

const LOG_FORMATS: &[&str] = &["pretty", "compact", "json"];

fn default_train_ham_dirs() -> Vec<String> {
    vec!["ham".to_string(), "ham2".to_string()]
}

fn default_train_spam_dirs() -> Vec<String> {
    vec!["spam".to_string()]
}

fn default_ham_dir() -> String {
    "ham".to_string()
}

fn default_spam_dir() -> String {
    "spam".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            train_ham_dirs: default_train_ham_dirs(),
            train_spam_dirs: default_train_spam_dirs(),
            test_ham_dir: default_ham_dir(),
            test_spam_dir: default_spam_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpamError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| SpamError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let corpus = &self.corpus;

        if corpus.train_ham_dirs.is_empty() {
            return Err(SpamError::Config("No training ham directories configured".to_string()));
        }
        if corpus.train_spam_dirs.is_empty() {
            return Err(SpamError::Config("No training spam directories configured".to_string()));
        }

        let names = corpus
            .train_ham_dirs
            .iter()
            .chain(corpus.train_spam_dirs.iter())
            .chain([&corpus.test_ham_dir, &corpus.test_spam_dir]);
        for name in names {
            if name.trim().is_empty() {
                return Err(SpamError::Config("Corpus directory names must not be empty".to_string()));
            }
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(SpamError::Config(format!(
                "Unknown log format '{}' (expected one of: {})",
                self.logging.format,
                LOG_FORMATS.join(", ")
            )));
        }

        Ok(())
    }
}
