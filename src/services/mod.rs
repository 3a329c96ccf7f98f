//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `policy.rs`: domain normalization and block-entry matching.
//! - `filter.rs`: navigation decision (`is_safe` / `evaluate`).
//! - `policy_store.rs`: block/allow lists, versioned snapshot reads.
//! - `auth.rs`: PIN storage, verification and change.
//! - `screen_time.rs`: per-site viewing time ledger.
//! - `activity.rs`: navigation history.
//! - `session.rs`: boundary façade driven by the browsing shell.
//! - `config.rs`: config file + override resolution.
//! - `storage.rs`: JSON documents, atomic writes, audit trail.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod activity;
pub mod auth;
pub mod config;
pub mod filter;
pub mod output;
pub mod policy;
pub mod policy_store;
pub mod screen_time;
pub mod session;
pub mod storage;
