use crate::domain::constants::POLICY_DOC;
use crate::domain::models::{Policy, PolicySnapshot};
use crate::error::{GuardError, GuardResult};
use crate::services::policy::normalize_domain;
use crate::services::storage::{parse_document, read_bytes, write_document, DataDir};
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Owner of the persisted block/allow lists.
///
/// Every read goes back to the document so edits made elsewhere apply on the
/// next check; the parse is skipped when the bytes hash to the cached version.
/// Single writer: concurrent processes saving the same document race and the
/// last write wins.
#[derive(Debug)]
pub struct PolicyStore {
    path: PathBuf,
    cache: RefCell<Option<PolicySnapshot>>,
}

impl PolicyStore {
    pub fn new(dir: &DataDir) -> Self {
        Self::at(dir.doc(POLICY_DOC))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RefCell::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current policy with its content version. A missing document is created
    /// empty and persisted.
    pub fn snapshot(&self) -> GuardResult<PolicySnapshot> {
        let raw = match read_bytes(&self.path)? {
            Some(raw) => raw,
            None => {
                tracing::info!(path = %self.path.display(), "creating default policy document");
                return self.save(&Policy::default());
            }
        };

        let version = content_version(&raw);
        if let Some(cached) = self.cache.borrow().as_ref() {
            if cached.version == version {
                return Ok(cached.clone());
            }
        }

        let policy: Policy = parse_document(&self.path, &raw)?;
        tracing::debug!(version = %version, blocked = policy.blocked_domains.len(), "policy reloaded");
        let snapshot = PolicySnapshot { version, policy };
        *self.cache.borrow_mut() = Some(snapshot.clone());
        Ok(snapshot)
    }

    pub fn load(&self) -> GuardResult<Policy> {
        Ok(self.snapshot()?.policy)
    }

    /// Full overwrite of both lists.
    pub fn save(&self, policy: &Policy) -> GuardResult<PolicySnapshot> {
        let raw = write_document(&self.path, policy)?;
        let snapshot = PolicySnapshot {
            version: content_version(&raw),
            policy: policy.clone(),
        };
        *self.cache.borrow_mut() = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Blocks the normalized form of `input`; returns that form.
    pub fn add_blocked(&self, input: &str) -> GuardResult<String> {
        let domain = require_domain(input)?;
        let mut policy = self.load()?;
        if position_of(&policy.blocked_domains, &domain).is_some() {
            return Err(GuardError::PolicyConflict(format!(
                "{} is already blocked",
                domain
            )));
        }
        policy.blocked_domains.push(domain.clone());
        self.save(&policy)?;
        tracing::info!(domain = %domain, "domain blocked");
        Ok(domain)
    }

    /// Unblocks the normalized form of `input` and records it as explicitly
    /// allowed. The allow list never overrides the block list.
    pub fn remove_blocked(&self, input: &str) -> GuardResult<String> {
        let domain = require_domain(input)?;
        let mut policy = self.load()?;
        let Some(idx) = position_of(&policy.blocked_domains, &domain) else {
            return Err(GuardError::PolicyConflict(format!(
                "{} is not in the blocked list",
                domain
            )));
        };
        policy.blocked_domains.remove(idx);
        if position_of(&policy.allowed_domains, &domain).is_none() {
            policy.allowed_domains.push(domain.clone());
        }
        self.save(&policy)?;
        tracing::info!(domain = %domain, "domain unblocked");
        Ok(domain)
    }
}

/// Normalized until stable, so input like `www.www.example.com` is stored
/// without any leading `www.`.
fn require_domain(input: &str) -> GuardResult<String> {
    let mut domain = normalize_domain(input);
    loop {
        let next = normalize_domain(&domain);
        if next == domain {
            break;
        }
        domain = next;
    }
    if domain.is_empty() {
        return Err(GuardError::Validation(
            "Please enter a website domain".to_string(),
        ));
    }
    Ok(domain)
}

/// Hand-edited documents may hold entries in any form; list membership is
/// decided on the normalized form, the same way blocking is.
fn position_of(list: &[String], domain: &str) -> Option<usize> {
    list.iter().position(|entry| normalize_domain(entry) == domain)
}

fn content_version(raw: &[u8]) -> String {
    hex::encode(Sha256::digest(raw))
}
