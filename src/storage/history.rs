//! Bounded, write-through cache of completed analyses.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{read_json, write_json};
use crate::models::HistoryEntry;

/// Maximum number of analyses retained. The oldest entry is evicted first.
pub const HISTORY_CAPACITY: usize = 10;

/// Most-recent-first list of past analyses mirrored to a single JSON file.
///
/// The file is read once by [`HistoryStore::load`] and rewritten in full after
/// every successful [`HistoryStore::append`].
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Reads the stored history. A missing or unreadable file yields an empty history.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut entries = match read_json::<Vec<HistoryEntry>, _>(&path) {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Ignoring unreadable history");
                Vec::new()
            }
        };
        entries.truncate(HISTORY_CAPACITY);
        tracing::debug!(path = %path.display(), entries = entries.len(), "History loaded");
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepends `entry`, drops anything past capacity and persists the result.
    ///
    /// Memory is only updated once the file write succeeds; on error both stay
    /// at the previous state.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<&[HistoryEntry]> {
        let mut next = Vec::with_capacity(HISTORY_CAPACITY);
        next.push(entry);
        next.extend(
            self.entries
                .iter()
                .take(HISTORY_CAPACITY - 1)
                .cloned(),
        );
        self.write(&next)?;
        self.entries = next;
        Ok(&self.entries)
    }

    /// Writes the full in-memory sequence to disk.
    pub fn persist(&self) -> Result<()> {
        self.write(&self.entries)
    }

    fn write(&self, entries: &[HistoryEntry]) -> Result<()> {
        write_json(&self.path, &entries)?;
        Ok(())
    }
}
