//! JSON persistence of a trained model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::model::SpamModel;
use crate::error::{Result, SpamError};

/// Current snapshot layout
pub const FORMAT_VERSION: u32 = 1;

/// Per-token document frequencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub ham_count: u32,
    pub spam_count: u32,
}

/// Serializable copy of a model's frequency tables and counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    pub ham_documents: u32,
    pub spam_documents: u32,
    pub tokens: Vec<TokenCount>,
}

impl ModelSnapshot {
    /// Write the snapshot as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read and check a snapshot file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SpamError::Snapshot(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let snapshot: ModelSnapshot = serde_json::from_str(&content)?;
        if snapshot.format_version != FORMAT_VERSION {
            return Err(SpamError::Snapshot(format!(
                "unsupported format version {} (expected {})",
                snapshot.format_version, FORMAT_VERSION
            )));
        }

        Ok(snapshot)
    }
}

impl SpamModel {
    /// Capture the model's current state
    pub fn snapshot(&self) -> ModelSnapshot {
        let (ham_documents, spam_documents) = self.training_counts();
        let tokens = self
            .tokens()
            .into_iter()
            .map(|(token, ham_count, spam_count)| TokenCount {
                token,
                ham_count,
                spam_count,
            })
            .collect();

        ModelSnapshot {
            format_version: FORMAT_VERSION,
            trained_at: Utc::now(),
            ham_documents,
            spam_documents,
            tokens,
        }
    }

    /// Rebuild a model from a snapshot
    pub fn from_snapshot(snapshot: ModelSnapshot) -> Self {
        let tokens = snapshot
            .tokens
            .into_iter()
            .map(|t| (t.token, t.ham_count, t.spam_count))
            .collect();

        SpamModel::from_parts(tokens, snapshot.ham_documents, snapshot.spam_documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spam::types::Document;

    fn trained_model() -> SpamModel {
        let mut model = SpamModel::new();
        model.train(
            &[
                Document::new("h1", "Lunch at noon? The usual place."),
                Document::new("h2", "Minutes from the planning meeting"),
            ],
            &[Document::new("s1", "Claim your FREE prize now, click here")],
        );
        model
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let model = trained_model();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        model.snapshot().save(&path).unwrap();
        let restored = SpamModel::from_snapshot(ModelSnapshot::load(&path).unwrap());

        assert_eq!(restored.training_counts(), model.training_counts());
        assert_eq!(restored.tokens(), model.tokens());

        let text = "free lunch meeting prize";
        assert_eq!(
            restored.score_text(text).to_bits(),
            model.score_text(text).to_bits()
        );
    }

    #[test]
    fn test_snapshot_tokens_are_sorted() {
        let snapshot = trained_model().snapshot();
        let tokens: Vec<&str> = snapshot.tokens.iter().map(|t| t.token.as_str()).collect();
        let mut sorted = tokens.clone();
        sorted.sort();
        assert_eq!(tokens, sorted);
        assert_eq!(snapshot.ham_documents, 2);
        assert_eq!(snapshot.spam_documents, 1);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut snapshot = trained_model().snapshot();
        snapshot.format_version = 99;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        snapshot.save(&path).unwrap();

        let err = ModelSnapshot::load(&path).unwrap_err();
        assert!(matches!(err, SpamError::Snapshot(_)));
    }

    #[test]
    fn test_load_missing_or_malformed() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ModelSnapshot::load(dir.path().join("absent.json")),
            Err(SpamError::Snapshot(_))
        ));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(ModelSnapshot::load(&path), Err(SpamError::Json(_))));
    }
}
