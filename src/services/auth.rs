use crate::domain::constants::{DEFAULT_PIN, PIN_DOC, PIN_LENGTH};
use crate::domain::models::PinDocument;
use crate::error::{GuardError, GuardResult};
use crate::services::storage::{read_document, write_document, DataDir};
use std::path::{Path, PathBuf};

/// PIN check guarding policy edits and safe-mode disablement.
///
/// Plain string equality against the stored secret. There is no hashing,
/// attempt throttling or lockout; anything beyond a single local desktop
/// session needs a salted hash and rate limiting here.
#[derive(Debug)]
pub struct AuthGate {
    path: PathBuf,
}

impl AuthGate {
    pub fn new(dir: &DataDir) -> Self {
        Self {
            path: dir.doc(PIN_DOC),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored PIN, writing the default secret on first use.
    fn stored_pin(&self) -> GuardResult<String> {
        if let Some(doc) = read_document::<PinDocument>(&self.path)? {
            return Ok(doc.pin);
        }
        tracing::info!(path = %self.path.display(), "initialising default PIN");
        write_document(
            &self.path,
            &PinDocument {
                pin: DEFAULT_PIN.to_string(),
            },
        )?;
        Ok(DEFAULT_PIN.to_string())
    }

    pub fn try_verify(&self, entered: &str) -> GuardResult<bool> {
        Ok(self.stored_pin()? == entered)
    }

    /// False on mismatch and when the secret cannot be read.
    pub fn verify(&self, entered: &str) -> bool {
        match self.try_verify(entered) {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!(error = %e, "PIN store unreadable, denying");
                false
            }
        }
    }

    /// Replaces the PIN after checking, in order: all fields present, current
    /// PIN correct, confirmation matches, new PIN is exactly four digits.
    pub fn change_secret(&self, current: &str, proposed: &str, confirm: &str) -> GuardResult<()> {
        if current.is_empty() || proposed.is_empty() || confirm.is_empty() {
            return Err(GuardError::Validation(
                "Please fill in all PIN fields".to_string(),
            ));
        }
        if !self.try_verify(current)? {
            return Err(GuardError::Validation(
                "Current PIN is incorrect".to_string(),
            ));
        }
        if proposed != confirm {
            return Err(GuardError::Validation("New PINs do not match".to_string()));
        }
        if !is_valid_pin(proposed) {
            return Err(GuardError::Validation("PIN must be 4 digits".to_string()));
        }

        write_document(
            &self.path,
            &PinDocument {
                pin: proposed.to_string(),
            },
        )?;
        tracing::info!("PIN changed");
        Ok(())
    }
}

pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit())
}
