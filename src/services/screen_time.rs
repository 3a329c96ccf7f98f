use crate::domain::constants::SCREEN_TIME_DOC;
use crate::domain::models::{ActiveSite, ScreenTimeLedger, ScreenTimeReport, SiteUsage};
use crate::error::GuardResult;
use crate::services::policy::normalize_domain;
use crate::services::storage::{read_document_or_default, write_document, DataDir};
use chrono::Utc;
use std::path::PathBuf;

/// Per-site active viewing time, sampled once per interval.
#[derive(Debug)]
pub struct ScreenTimeTracker {
    path: PathBuf,
    ledger: ScreenTimeLedger,
    interval_secs: u64,
    active: Option<ActiveSite>,
}

impl ScreenTimeTracker {
    pub fn open(dir: &DataDir, interval_secs: u64) -> Self {
        let path = dir.doc(SCREEN_TIME_DOC);
        let ledger = read_document_or_default(&path);
        Self {
            path,
            ledger,
            interval_secs,
            active: None,
        }
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    pub fn ledger(&self) -> &ScreenTimeLedger {
        &self.ledger
    }

    pub fn active(&self) -> Option<&ActiveSite> {
        self.active.as_ref()
    }

    /// Makes `url` the active site and restarts its anchor. Time already
    /// sampled stays with whichever site was active when it was sampled.
    pub fn set_active(&mut self, url: &str) {
        let key = normalize_domain(url);
        if key.is_empty() {
            self.active = None;
            return;
        }
        self.active = Some(ActiveSite {
            key,
            url: url.to_string(),
            since: Utc::now(),
        });
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Adds one interval to `site` and persists the whole ledger. No-op when
    /// nothing is active.
    pub fn tick(&mut self, site: Option<&str>) -> GuardResult<()> {
        let Some(site) = site else {
            return Ok(());
        };
        *self.ledger.entry(site.to_string()).or_insert(0) += self.interval_secs;
        write_document(&self.path, &self.ledger)?;
        Ok(())
    }

    /// Samples whatever site is currently active.
    pub fn tick_active(&mut self) -> GuardResult<()> {
        let site = self.active.as_ref().map(|a| a.key.clone());
        self.tick(site.as_deref())
    }

    pub fn seconds_for(&self, site: &str) -> u64 {
        self.ledger.get(site).copied().unwrap_or(0)
    }

    pub fn total_seconds(&self) -> u64 {
        self.ledger.values().sum()
    }

    /// Whole minutes, truncated.
    pub fn total_minutes(&self) -> u64 {
        self.total_seconds() / 60
    }

    pub fn report(&self) -> ScreenTimeReport {
        let total = self.total_seconds();
        let mut sites: Vec<SiteUsage> = self
            .ledger
            .iter()
            .map(|(site, seconds)| SiteUsage {
                site: site.clone(),
                seconds: *seconds,
                label: format_duration(*seconds),
            })
            .collect();
        sites.sort_by(|a, b| b.seconds.cmp(&a.seconds).then_with(|| a.site.cmp(&b.site)));

        ScreenTimeReport {
            total_seconds: total,
            total_minutes: total / 60,
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            sites,
        }
    }
}

pub fn format_duration(seconds: u64) -> String {
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}
