//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `admin.rs`: PIN-gated block/allowed/pin command trees.
//! - `runtime.rs`: check/history/screen-time/session.
//! - `shell.rs`: line protocol for the interactive session.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `safenav::services`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod runtime;
pub mod shell;

pub use admin::{handle_allowed_commands, handle_block_commands, handle_pin_commands};
pub use runtime::handle_runtime_commands;
