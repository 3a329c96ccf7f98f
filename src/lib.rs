//! Parental content-access filter.
//!
//! Decides whether a navigation target may be visited given a PIN-protected
//! block list and a process-wide safe-mode flag, and keeps per-site screen time
//! and a navigation history for the browsing shell that embeds it.
//!
//! ## Layers
//! - `domain`: persisted documents, verdicts and report structs.
//! - `services`: normalization, filtering, stores, PIN gate, session façade.
//! - `error`: the error taxonomy surfaced to the shell.
//!
//! A shell opens one [`Session`] and drives it with navigation events and
//! timer ticks:
//!
//! ```no_run
//! use safenav::{DataDir, Session};
//!
//! let mut session = Session::open_dir(DataDir::new("/tmp/safenav"), 1);
//! if session.navigate("kiddle.co").accepted {
//!     session.on_page_loaded("https://kiddle.co", "Kiddle")?;
//!     session.on_tick()?;
//! }
//! # Ok::<(), safenav::GuardError>(())
//! ```

pub mod domain;
pub mod error;
pub mod services;

pub use domain::constants::*;
pub use domain::models::*;
pub use error::{GuardError, GuardResult};
pub use services::activity::{history_line, ActivityLog};
pub use services::auth::{is_valid_pin, AuthGate};
pub use services::config::{resolve_settings, Overrides, Settings};
pub use services::filter::{evaluate, is_safe};
pub use services::policy::normalize_domain;
pub use services::policy_store::PolicyStore;
pub use services::screen_time::{format_duration, ScreenTimeTracker};
pub use services::session::{complete_target, Session};
pub use services::storage::DataDir;
