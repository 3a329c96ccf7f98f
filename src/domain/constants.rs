/// PIN written on first use when no secret document exists.
pub const DEFAULT_PIN: &str = "0000";

/// Number of digits a PIN must have.
pub const PIN_LENGTH: usize = 4;

pub const DEFAULT_HOME_URL: &str = "https://www.kiddle.co";

/// Screen-time sampling interval in seconds.
pub const DEFAULT_TICK_SECONDS: u64 = 1;

pub const APP_DIR_NAME: &str = "safenav";

pub const POLICY_DOC: &str = "policy.json";
pub const PIN_DOC: &str = "pin.json";
pub const SCREEN_TIME_DOC: &str = "screen_time.json";
pub const HISTORY_DOC: &str = "history.json";
pub const AUDIT_LOG: &str = "audit.jsonl";
pub const CONFIG_FILE: &str = "config.toml";

pub const WEB_SCHEMES: [&str; 2] = ["http", "https"];
