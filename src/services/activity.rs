use crate::domain::constants::HISTORY_DOC;
use crate::domain::models::HistoryEntry;
use crate::error::GuardResult;
use crate::services::storage::{read_document_or_default, write_document, DataDir};
use std::path::PathBuf;

/// Append-only navigation history. The whole list is rewritten after every
/// append; there is no dedup and no size cap.
#[derive(Debug)]
pub struct ActivityLog {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl ActivityLog {
    pub fn open(dir: &DataDir) -> Self {
        let path = dir.doc(HISTORY_DOC);
        let entries = read_document_or_default(&path);
        Self { path, entries }
    }

    pub fn record(&mut self, entry: HistoryEntry) -> GuardResult<()> {
        tracing::debug!(url = %entry.url, "history entry recorded");
        self.entries.push(entry);
        write_document(&self.path, &self.entries)?;
        Ok(())
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn history_line(entry: &HistoryEntry) -> String {
    format!(
        "{} - {} ({})",
        entry.timestamp.to_rfc3339(),
        entry.title,
        entry.url
    )
}
