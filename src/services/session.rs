use crate::domain::constants::DEFAULT_HOME_URL;
use crate::domain::models::{
    HistoryEntry, Policy, ScreenTimeReport, SessionStatus, Verdict,
};
use crate::error::{GuardError, GuardResult};
use crate::services::activity::ActivityLog;
use crate::services::auth::AuthGate;
use crate::services::config::Settings;
use crate::services::filter;
use crate::services::policy::has_web_scheme;
use crate::services::policy_store::PolicyStore;
use crate::services::screen_time::ScreenTimeTracker;
use crate::services::storage::{audit, DataDir};
use chrono::Utc;
use serde_json::json;

/// Everything a browsing shell talks to.
///
/// Owns the persisted stores plus two pieces of process state that are never
/// written to disk: the safe-mode flag (always `true` when a session opens)
/// and whether the PIN has been entered for the policy-editing surface.
#[derive(Debug)]
pub struct Session {
    dir: DataDir,
    policy: PolicyStore,
    auth: AuthGate,
    screen_time: ScreenTimeTracker,
    activity: ActivityLog,
    home_url: String,
    safe_mode: bool,
    unlocked: bool,
    current_url: Option<String>,
}

impl Session {
    pub fn open(settings: &Settings) -> Self {
        let mut session = Self::open_dir(settings.data_dir.clone(), settings.tick_seconds);
        session.home_url = settings.home_url.clone();
        session
    }

    /// Never fails: the screen-time ledger and history are side records and an
    /// unreadable one starts empty instead of taking the filter down with it.
    pub fn open_dir(dir: DataDir, tick_seconds: u64) -> Self {
        let screen_time = ScreenTimeTracker::open(&dir, tick_seconds);
        let activity = ActivityLog::open(&dir);
        Self {
            policy: PolicyStore::new(&dir),
            auth: AuthGate::new(&dir),
            screen_time,
            activity,
            home_url: DEFAULT_HOME_URL.to_string(),
            safe_mode: true,
            unlocked: false,
            current_url: None,
            dir,
        }
    }

    pub fn data_dir(&self) -> &DataDir {
        &self.dir
    }

    pub fn policy_store(&self) -> &PolicyStore {
        &self.policy
    }

    pub fn safe_mode(&self) -> bool {
        self.safe_mode
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// Decision for a target about to be committed, under the current
    /// safe-mode flag.
    pub fn evaluate_navigation(&self, url: &str) -> Verdict {
        filter::evaluate(&self.policy, url, self.safe_mode)
    }

    /// URL-bar entry: adds `https://` when no web scheme is given, evaluates,
    /// and on acceptance makes the target the current page.
    pub fn navigate(&mut self, input: &str) -> Verdict {
        let target = complete_target(input);
        self.commit_if_accepted(&target)
    }

    /// Page-initiated navigation; the target is evaluated exactly as given.
    pub fn follow_link(&mut self, url: &str) -> Verdict {
        self.commit_if_accepted(url)
    }

    pub fn home(&mut self) -> Verdict {
        let home = self.home_url.clone();
        self.commit_if_accepted(&home)
    }

    fn commit_if_accepted(&mut self, url: &str) -> Verdict {
        let verdict = self.evaluate_navigation(url);
        if verdict.accepted {
            self.on_url_changed(url);
        } else {
            tracing::info!(url, reason = %verdict.describe(), "navigation refused");
        }
        verdict
    }

    /// Opens the policy-editing surface when `pin` is correct.
    pub fn authenticate(&mut self, pin: &str) -> bool {
        let ok = self.auth.verify(pin);
        if ok {
            self.unlocked = true;
        } else {
            audit(&self.dir, "auth_failed", json!({}));
            tracing::warn!("incorrect PIN entered");
        }
        ok
    }

    pub fn lock(&mut self) {
        self.unlocked = false;
    }

    fn require_unlocked(&self) -> GuardResult<()> {
        if self.unlocked {
            Ok(())
        } else {
            Err(GuardError::AuthFailure)
        }
    }

    pub fn policy(&self) -> GuardResult<Policy> {
        self.require_unlocked()?;
        self.policy.load()
    }

    pub fn add_blocked(&mut self, input: &str) -> GuardResult<String> {
        self.require_unlocked()?;
        let domain = self.policy.add_blocked(input)?;
        audit(&self.dir, "block", json!({ "domain": domain }));
        Ok(domain)
    }

    pub fn remove_blocked(&mut self, input: &str) -> GuardResult<String> {
        self.require_unlocked()?;
        let domain = self.policy.remove_blocked(input)?;
        audit(&self.dir, "allow", json!({ "domain": domain }));
        Ok(domain)
    }

    pub fn change_pin(&mut self, current: &str, proposed: &str, confirm: &str) -> GuardResult<()> {
        self.require_unlocked()?;
        self.auth.change_secret(current, proposed, confirm)?;
        audit(&self.dir, "pin_change", json!({}));
        Ok(())
    }

    /// Turning filtering off always needs the PIN.
    pub fn disable_safe_mode(&mut self, pin: &str) -> GuardResult<()> {
        if !self.safe_mode {
            return Ok(());
        }
        if !self.auth.verify(pin) {
            audit(&self.dir, "auth_failed", json!({ "operation": "safe_mode_off" }));
            return Err(GuardError::AuthFailure);
        }
        self.safe_mode = false;
        audit(&self.dir, "safe_mode", json!({ "enabled": false }));
        tracing::warn!("safe mode disabled, content filtering is off");
        Ok(())
    }

    /// Turning filtering back on never needs the PIN.
    pub fn enable_safe_mode(&mut self) {
        if !self.safe_mode {
            self.safe_mode = true;
            audit(&self.dir, "safe_mode", json!({ "enabled": true }));
            tracing::info!("safe mode enabled");
        }
    }

    pub fn on_url_changed(&mut self, url: &str) {
        self.current_url = Some(url.to_string());
        self.screen_time.set_active(url);
    }

    /// Records the finished load in history; a URL different from the
    /// current one also restarts the screen-time anchor.
    pub fn on_page_loaded(&mut self, url: &str, title: &str) -> GuardResult<()> {
        if self.current_url.as_deref() != Some(url) {
            self.on_url_changed(url);
        }
        self.activity.record(HistoryEntry {
            timestamp: Utc::now(),
            url: url.to_string(),
            title: title.to_string(),
        })
    }

    pub fn on_tick(&mut self) -> GuardResult<()> {
        self.screen_time.tick_active()
    }

    pub fn screen_time(&self) -> ScreenTimeReport {
        self.screen_time.report()
    }

    pub fn tracker(&self) -> &ScreenTimeTracker {
        &self.screen_time
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.activity.entries()
    }

    pub fn recent_history(&self, n: usize) -> &[HistoryEntry] {
        self.activity.recent(n)
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            safe_mode: self.safe_mode,
            unlocked: self.unlocked,
            current_url: self.current_url.clone(),
            active_site: self.screen_time.active().cloned(),
            total_minutes: self.screen_time.total_minutes(),
            history_entries: self.activity.len(),
        }
    }
}

/// URL-bar completion: `https://` is prepended unless the input already
/// carries an http(s) scheme.
pub fn complete_target(input: &str) -> String {
    let s = input.trim();
    if has_web_scheme(s) {
        s.to_string()
    } else {
        format!("https://{}", s)
    }
}
