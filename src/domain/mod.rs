//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep persisted documents and report structs in one place.
//! - Avoid cyclic imports between services.
//! - Make JSON document and output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: persisted documents, verdicts, report/output structs.
//! - `constants.rs`: stable constants (default PIN, document names, home page).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect the on-disk documents and `--json` outputs.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
