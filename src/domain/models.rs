use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

/// Blocked/allowed domain lists. Entries are stored normalized.
///
/// `allowed_domains` is bookkeeping of explicit unblocks and never overrides
/// a block during evaluation.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(default, alias = "blocked_websites")]
    pub blocked_domains: Vec<String>,
    #[serde(default, alias = "allowed_websites")]
    pub allowed_domains: Vec<String>,
}

/// Parsed policy tagged with the hex SHA-256 of the bytes it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySnapshot {
    pub version: String,
    pub policy: Policy,
}

#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PinDocument {
    pub pin: String,
}

impl fmt::Debug for PinDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinDocument").field("pin", &"****").finish()
    }
}

/// Site key -> accumulated seconds of active viewing.
pub type ScreenTimeLedger = BTreeMap<String, u64>;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub title: String,
}

/// RFC 3339, or an ISO-8601 local time without offset (older history files),
/// which is read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerdictReason {
    SafeModeOff,
    NotBlocked,
    UnsupportedScheme { scheme: Option<String> },
    Blocked { entry: String },
    PolicyUnavailable { message: String },
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub accepted: bool,
    pub url: String,
    pub domain: Option<String>,
    pub reason: VerdictReason,
}

impl Verdict {
    pub fn describe(&self) -> String {
        match &self.reason {
            VerdictReason::SafeModeOff => "safe mode is off".to_string(),
            VerdictReason::NotBlocked => "not on the block list".to_string(),
            VerdictReason::UnsupportedScheme { scheme: Some(s) } => {
                format!("scheme '{}' is not allowed", s)
            }
            VerdictReason::UnsupportedScheme { scheme: None } => {
                "address has no http(s) scheme".to_string()
            }
            VerdictReason::Blocked { entry } => format!("{} is blocked", entry),
            VerdictReason::PolicyUnavailable { message } => {
                format!("policy unavailable: {}", message)
            }
        }
    }
}

/// The site currently being viewed and when viewing started.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ActiveSite {
    pub key: String,
    pub url: String,
    pub since: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SiteUsage {
    pub site: String,
    pub seconds: u64,
    pub label: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ScreenTimeReport {
    pub total_seconds: u64,
    pub total_minutes: u64,
    pub hours: u64,
    pub minutes: u64,
    pub sites: Vec<SiteUsage>,
}

#[derive(Debug, Serialize, Clone)]
pub struct SessionStatus {
    pub safe_mode: bool,
    pub unlocked: bool,
    pub current_url: Option<String>,
    pub active_site: Option<ActiveSite>,
    pub total_minutes: u64,
    pub history_entries: usize,
}

#[derive(Debug, Serialize)]
pub struct PolicyChange {
    pub action: String,
    pub domain: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub general: ConfigGeneral,
    #[serde(default)]
    pub logging: ConfigLogging,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigGeneral {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub home_url: Option<String>,
    #[serde(default)]
    pub tick_seconds: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigLogging {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}
