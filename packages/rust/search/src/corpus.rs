//! In-memory corpus of documentation records.
//!
//! Populated once per process from the persisted JSON file and read-only
//! thereafter. Callers that need a process-wide handle wrap the corpus in an
//! `Arc` and pass it explicitly; there is no ambient singleton.

use std::path::Path;

use tracing::{info, warn};

use docgrounder_shared::{DocGrounderError, DocRecord, Result};

/// The full collection of records available to the scorer.
#[derive(Debug, Default)]
pub struct Corpus {
    records: Vec<DocRecord>,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection with the given records (load order is the
    /// tie-break order for search).
    pub fn load(&mut self, records: Vec<DocRecord>) {
        self.records = records;
    }

    /// All records, in load order.
    pub fn all(&self) -> &[DocRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive exact lookup by class name; first match wins when
    /// duplicates exist.
    pub fn find_by_name(&self, class_name: &str) -> Option<&DocRecord> {
        let lower = class_name.to_lowercase();
        self.records
            .iter()
            .find(|record| record.class_name.to_lowercase() == lower)
    }

    /// Sorted list of all class names in the corpus.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .iter()
            .map(|record| record.class_name.clone())
            .collect();
        names.sort();
        names
    }

    /// Load a corpus from the persisted JSON file.
    ///
    /// A missing or malformed file leaves the corpus empty (search then
    /// returns no results) and logs the cause; it never fails the process.
    pub fn load_file(path: &Path) -> Self {
        let mut corpus = Self::new();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corpus file unreadable, starting empty");
                return corpus;
            }
        };

        match serde_json::from_str::<Vec<DocRecord>>(&content) {
            Ok(records) => {
                info!(path = %path.display(), classes = records.len(), "corpus loaded");
                corpus.load(records);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corpus file malformed, starting empty");
            }
        }

        corpus
    }
}

/// Persist a record sequence as a pretty-printed JSON array — the sole
/// handoff artifact between the extraction pipeline and the serving process.
pub fn save_file(path: &Path, records: &[DocRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| DocGrounderError::io(parent, e))?;
        }
    }

    let json = serde_json::to_string_pretty(records)
        .map_err(|e| DocGrounderError::validation(format!("JSON serialization failed: {e}")))?;
    std::fs::write(path, json).map_err(|e| DocGrounderError::io(path, e))?;

    info!(path = %path.display(), classes = records.len(), "corpus written");
    Ok(())
}
