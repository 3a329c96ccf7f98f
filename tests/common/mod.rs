#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const DEFAULT_PIN: &str = "0000";

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    cargo_home: PathBuf,
    rustup_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let orig_home = std::env::var("HOME").unwrap_or_default();
        let cargo_home = PathBuf::from(&orig_home).join(".cargo");
        let rustup_home = PathBuf::from(&orig_home).join(".rustup");

        Self {
            _tmp: tmp,
            home,
            cargo_home,
            rustup_home,
        }
    }

    /// Default data directory under the isolated home.
    pub fn data_dir(&self) -> PathBuf {
        self.home.join(".config/safenav")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("safenav");
        cmd.env("HOME", &self.home)
            .env("CARGO_HOME", &self.cargo_home)
            .env("RUSTUP_HOME", &self.rustup_home)
            .env_remove("SAFENAV_PIN")
            .env_remove("SAFENAV_DATA_DIR")
            .env_remove("SAFENAV_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    /// Runs a command expected to fail and returns its JSON error envelope.
    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json error output")
    }

    /// Feeds `script` to `safenav --json session`, one JSON object per line back.
    pub fn run_session(&self, script: &str) -> Vec<Value> {
        let mut cmd = self.cmd();
        let out = cmd
            .args(["--json", "session"])
            .write_stdin(script)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(out)
            .expect("utf8 output")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect()
    }
}
