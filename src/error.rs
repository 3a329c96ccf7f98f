use std::path::PathBuf;

/// Outcomes the filter core reports back to its caller.
///
/// None of these are fatal; the boundary turns each into a human-readable
/// message.
#[derive(thiserror::Error, Debug)]
pub enum GuardError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    PolicyConflict(String),
    #[error("incorrect PIN")]
    AuthFailure,
    #[error("storage unavailable at {}: {reason}", .path.display())]
    StorageUnavailable { path: PathBuf, reason: String },
}

impl GuardError {
    pub fn kind(&self) -> &'static str {
        match self {
            GuardError::Validation(_) => "validation",
            GuardError::PolicyConflict(_) => "policy_conflict",
            GuardError::AuthFailure => "auth_failure",
            GuardError::StorageUnavailable { .. } => "storage_unavailable",
        }
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        GuardError::StorageUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type GuardResult<T> = Result<T, GuardError>;
