//! Corpus sources
//!
//! Turns storage into [`Document`] values. A source that cannot be read is
//! never fatal: it is logged, recorded as a [`SkippedSource`], and the
//! remaining documents are still produced.

pub mod directory;
pub mod mbox;

pub use directory::DirectoryCorpus;
pub use mbox::{MboxCorpus, MboxReader};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::spam::Document;

/// A directory, file or message that could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub reason: String,
}

impl SkippedSource {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Read a whole file as text, replacing invalid UTF-8 sequences
pub(crate) fn read_document_text(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a single file as one document named after the file
pub fn read_document<P: AsRef<Path>>(path: P) -> std::io::Result<Document> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Document::new(name, read_document_text(path)?))
}

/// Either kind of corpus, chosen from the path
pub enum CorpusSource {
    Directory(DirectoryCorpus),
    Mbox(MboxCorpus),
}

impl CorpusSource {
    /// Sources skipped so far
    pub fn skipped(&self) -> &[SkippedSource] {
        match self {
            CorpusSource::Directory(corpus) => corpus.skipped(),
            CorpusSource::Mbox(corpus) => corpus.skipped(),
        }
    }

    /// Take the skip list, leaving it empty
    pub fn take_skipped(&mut self) -> Vec<SkippedSource> {
        match self {
            CorpusSource::Directory(corpus) => corpus.take_skipped(),
            CorpusSource::Mbox(corpus) => corpus.take_skipped(),
        }
    }
}

impl Iterator for CorpusSource {
    type Item = Document;

    fn next(&mut self) -> Option<Document> {
        match self {
            CorpusSource::Directory(corpus) => corpus.next(),
            CorpusSource::Mbox(corpus) => corpus.next(),
        }
    }
}

/// Open `path` as an MBOX file if it is a regular file with an `mbox`
/// extension, otherwise as a directory corpus.
pub fn open_source<P: AsRef<Path>>(path: P) -> CorpusSource {
    let path = path.as_ref();
    if is_mbox(path) {
        CorpusSource::Mbox(MboxCorpus::open(path))
    } else {
        CorpusSource::Directory(DirectoryCorpus::open(path))
    }
}

/// Whether `path` is a regular file with an `mbox` extension
pub fn is_mbox(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("mbox"))
            .unwrap_or(false)
}
