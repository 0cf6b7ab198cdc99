//! One-file-per-message directory corpus

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{read_document_text, SkippedSource};
use crate::spam::Document;

/// Yields one [`Document`] per regular file of a directory, sorted by name.
///
/// Symlinks are followed. Sub-directories, FIFOs, sockets and devices are
/// ignored. Files are opened, read and closed one at a time as the iterator
/// advances. Anything that cannot be read is recorded in
/// [`DirectoryCorpus::skipped`] and iteration continues.
#[derive(Debug)]
pub struct DirectoryCorpus {
    root: PathBuf,
    entries: std::vec::IntoIter<PathBuf>,
    skipped: Vec<SkippedSource>,
}

impl DirectoryCorpus {
    /// List the files of `root`.
    ///
    /// A missing or unlistable directory gives an empty corpus with one
    /// skipped entry.
    pub fn open<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let mut skipped = Vec::new();

        let entries = match list_files(&root, &mut skipped) {
            Ok(files) => files,
            Err(reason) => {
                warn!("Invalid directory {}: {}", root.display(), reason);
                skipped.push(SkippedSource::new(&root, reason));
                Vec::new()
            }
        };

        Self {
            root,
            entries: entries.into_iter(),
            skipped,
        }
    }

    /// Directory this corpus reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sources skipped so far
    pub fn skipped(&self) -> &[SkippedSource] {
        &self.skipped
    }

    /// Take the skip list, leaving it empty
    pub fn take_skipped(&mut self) -> Vec<SkippedSource> {
        std::mem::take(&mut self.skipped)
    }
}

fn list_files(root: &Path, skipped: &mut Vec<SkippedSource>) -> std::result::Result<Vec<PathBuf>, String> {
    if !root.is_dir() {
        return Err("not a directory".to_string());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(root).map_err(|e| e.to_string())? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to list entry in {}: {}", root.display(), e);
                skipped.push(SkippedSource::new(root, e.to_string()));
                continue;
            }
        };

        // follows symlinks; a dangling link fails here
        let path = entry.path();
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => debug!("Ignoring non-regular entry {}", path.display()),
            Err(e) => {
                warn!("Skipping unreadable document {}: {}", path.display(), e);
                skipped.push(SkippedSource::new(&path, e.to_string()));
            }
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

impl Iterator for DirectoryCorpus {
    type Item = Document;

    fn next(&mut self) -> Option<Document> {
        for path in self.entries.by_ref() {
            match read_document_text(&path) {
                Ok(text) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    return Some(Document::new(name, text));
                }
                Err(e) => {
                    warn!("Skipping unreadable document {}: {}", path.display(), e);
                    self.skipped.push(SkippedSource::new(&path, e.to_string()));
                }
            }
        }
        None
    }
}
