//! MBOX corpus
//!
//! Reads many messages from a single MBOX file.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::SkippedSource;
use crate::spam::Document;

/// MBOX reader yielding raw message text
///
/// Lines are decoded as lossy UTF-8.
pub struct MboxReader<R: Read> {
    reader: BufReader<R>,
    line_buf: Vec<u8>,
    current_line: String,
    message_count: u64,
    eof: bool,
    /// Flag indicating we already have a From_ line in current_line
    has_pending_from: bool,
}

impl<R: Read> MboxReader<R> {
    /// Create a new MBOX reader
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_buf: Vec::new(),
            current_line: String::new(),
            message_count: 0,
            eof: false,
            has_pending_from: false,
        }
    }

    /// Read the next message, without its From_ separator line
    pub fn read_message(&mut self) -> std::io::Result<Option<String>> {
        if self.eof {
            return Ok(None);
        }

        if !self.has_pending_from {
            // Skip any preamble up to the first From_ line
            loop {
                if !self.next_line()? {
                    self.eof = true;
                    return Ok(None);
                }
                if self.current_line.starts_with("From ") {
                    break;
                }
            }
        }

        self.has_pending_from = false;
        let mut message = String::new();

        loop {
            if !self.next_line()? {
                self.eof = true;
                break;
            }

            if self.current_line.starts_with("From ") {
                self.has_pending_from = true;
                break;
            }

            // Unescape >From lines
            let line = self
                .current_line
                .strip_prefix('>')
                .filter(|rest| rest.starts_with("From "))
                .unwrap_or(self.current_line.as_str());
            message.push_str(line);
        }

        while message.ends_with("\n\n") {
            message.pop();
        }

        self.message_count += 1;
        Ok(Some(message))
    }

    /// Get the number of messages read
    pub fn message_count(&self) -> u64 {
        self.message_count
    }

    /// Load the next line into `current_line`; false at end of input
    fn next_line(&mut self) -> std::io::Result<bool> {
        self.line_buf.clear();
        if self.reader.read_until(b'\n', &mut self.line_buf)? == 0 {
            return Ok(false);
        }
        self.current_line = String::from_utf8_lossy(&self.line_buf).into_owned();
        Ok(true)
    }
}

/// Yields one [`Document`] per message of an MBOX file.
///
/// Documents are named `<file name>#<n>` with `n` counting from 1. The file
/// is streamed one message at a time and closed once the last message has
/// been read. A read error part-way through ends the corpus and is recorded
/// in [`MboxCorpus::skipped`]; messages already yielded stay valid.
pub struct MboxCorpus {
    path: PathBuf,
    file_name: String,
    reader: Option<MboxReader<Box<dyn Read + Send>>>,
    skipped: Vec<SkippedSource>,
}

impl MboxCorpus {
    /// Open an MBOX file; an unreadable file gives an empty corpus with one
    /// skipped entry.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => Self::from_reader(path, file),
            Err(e) => {
                warn!("Skipping unreadable mbox {}: {}", path.display(), e);
                Self {
                    path: path.to_path_buf(),
                    file_name: file_name_of(path),
                    reader: None,
                    skipped: vec![SkippedSource::new(path, e.to_string())],
                }
            }
        }
    }

    /// Read messages from `reader`, naming and reporting them after `path`
    pub fn from_reader<P: AsRef<Path>, R: Read + Send + 'static>(path: P, reader: R) -> Self {
        let path = path.as_ref();
        let reader: Box<dyn Read + Send> = Box::new(reader);

        Self {
            path: path.to_path_buf(),
            file_name: file_name_of(path),
            reader: Some(MboxReader::new(reader)),
            skipped: Vec::new(),
        }
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

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl Iterator for MboxCorpus {
    type Item = Document;

    fn next(&mut self) -> Option<Document> {
        let reader = self.reader.as_mut()?;

        match reader.read_message() {
            Ok(Some(text)) => {
                let name = format!("{}#{}", self.file_name, reader.message_count());
                Some(Document::new(name, text))
            }
            Ok(None) => {
                self.reader = None;
                None
            }
            Err(e) => {
                warn!("Stopped reading mbox {}: {}", self.path.display(), e);
                self.skipped.push(SkippedSource::new(&self.path, e.to_string()));
                self.reader = None;
                None
            }
        }
    }
}
