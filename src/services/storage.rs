use crate::domain::constants::AUDIT_LOG;
use crate::error::{GuardError, GuardResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Directory holding every persisted document.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn doc(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// Raw bytes of a document, `None` when it does not exist yet.
pub fn read_bytes(path: &Path) -> GuardResult<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GuardError::storage(path, e)),
    }
}

pub fn parse_document<T: DeserializeOwned>(path: &Path, raw: &[u8]) -> GuardResult<T> {
    serde_json::from_slice(raw).map_err(|e| GuardError::storage(path, e))
}

pub fn read_document<T: DeserializeOwned>(path: &Path) -> GuardResult<Option<T>> {
    match read_bytes(path)? {
        Some(raw) => Ok(Some(parse_document(path, &raw)?)),
        None => Ok(None),
    }
}

/// Side records (screen time, history) load through here: a missing or
/// unreadable document starts from `T::default()` and the next save replaces it.
pub fn read_document_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match read_document(path) {
        Ok(doc) => doc.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable document");
            T::default()
        }
    }
}

/// Serializes `value` as pretty JSON and replaces `path` with it.
///
/// Returns the bytes that were written.
pub fn write_document<T: Serialize>(path: &Path, value: &T) -> GuardResult<Vec<u8>> {
    let raw = serde_json::to_vec_pretty(value).map_err(|e| GuardError::storage(path, e))?;
    write_atomic(path, &raw)?;
    Ok(raw)
}

/// Full overwrite through a temp file in the same directory plus rename, so an
/// interrupted save never leaves a half-written document.
fn write_atomic(path: &Path, content: &[u8]) -> GuardResult<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| GuardError::storage(parent, e))?;

    let mut temp_file =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| GuardError::storage(parent, e))?;
    temp_file
        .write_all(content)
        .map_err(|e| GuardError::storage(path, e))?;
    temp_file
        .persist(path)
        .map_err(|e| GuardError::storage(path, e.error))?;
    Ok(())
}

/// Appends one administrative event to the audit trail. Best effort: a failed
/// audit write is logged and otherwise ignored.
pub fn audit(dir: &DataDir, action: &str, data: serde_json::Value) {
    let path = dir.doc(AUDIT_LOG);
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let written = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .and_then(|mut f| f.write_all(line.as_bytes()));
    if let Err(e) = written {
        tracing::warn!(path = %path.display(), error = %e, "failed to append audit event");
    }
}
