mod common;

use common::{TestEnv, DEFAULT_PIN};
use predicates::str::contains;
use std::fs;

#[test]
fn block_check_allow_round_trip() {
    let env = TestEnv::new();

    let added = env.run_json(&["block", "add", "https://WWW.YouTube.com/", "--pin", DEFAULT_PIN]);
    assert_eq!(added["ok"], true);
    assert_eq!(added["data"]["domain"], "youtube.com");

    let blocked = env.run_json(&["check", "https://www.youtube.com"]);
    assert_eq!(blocked["data"]["accepted"], false);
    assert_eq!(blocked["data"]["reason"]["kind"], "blocked");
    assert_eq!(blocked["data"]["reason"]["entry"], "youtube.com");

    let sub = env.run_json(&["check", "https://m.youtube.com/feed"]);
    assert_eq!(sub["data"]["accepted"], false);

    let lookalike = env.run_json(&["check", "https://youtube.com.evil.net"]);
    assert_eq!(lookalike["data"]["accepted"], true);

    let removed = env.run_json(&["block", "remove", "youtube.com", "--pin", DEFAULT_PIN]);
    assert_eq!(removed["data"]["action"], "allow");

    let again = env.run_json(&["check", "https://www.youtube.com"]);
    assert_eq!(again["data"]["accepted"], true);

    let allowed = env.run_json(&["allowed", "list", "--pin", DEFAULT_PIN]);
    assert_eq!(allowed["data"], serde_json::json!(["youtube.com"]));

    let blocked_list = env.run_json(&["block", "list", "--pin", DEFAULT_PIN]);
    assert_eq!(blocked_list["data"], serde_json::json!([]));
}

#[test]
fn policy_document_is_camel_case_json() {
    let env = TestEnv::new();
    env.run_json(&["block", "add", "reddit.com", "--pin", DEFAULT_PIN]);

    let raw = fs::read_to_string(env.data_dir().join("policy.json")).expect("policy written");
    let doc: serde_json::Value = serde_json::from_str(&raw).expect("policy json");
    assert_eq!(doc["blockedDomains"], serde_json::json!(["reddit.com"]));
    assert_eq!(doc["allowedDomains"], serde_json::json!([]));

    let pin: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(env.data_dir().join("pin.json")).unwrap())
            .unwrap();
    assert_eq!(pin["pin"], DEFAULT_PIN);
}

#[test]
fn wrong_pin_refuses_policy_edits() {
    let env = TestEnv::new();
    let err = env.run_json_failure(&["block", "add", "youtube.com", "--pin", "1234"]);
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"]["kind"], "auth_failure");

    let check = env.run_json(&["check", "https://youtube.com"]);
    assert_eq!(check["data"]["accepted"], true);
}

#[test]
fn duplicate_and_unknown_entries_conflict() {
    let env = TestEnv::new();
    env.run_json(&["block", "add", "youtube.com", "--pin", DEFAULT_PIN]);

    let dup = env.run_json_failure(&["block", "add", "www.youtube.com", "--pin", DEFAULT_PIN]);
    assert_eq!(dup["error"]["kind"], "policy_conflict");
    assert_eq!(dup["error"]["message"], "youtube.com is already blocked");

    let missing = env.run_json_failure(&["block", "remove", "kiddle.co", "--pin", DEFAULT_PIN]);
    assert_eq!(missing["error"]["kind"], "policy_conflict");
    assert_eq!(missing["error"]["message"], "kiddle.co is not in the blocked list");
}

#[test]
fn pin_change_validates_then_persists() {
    let env = TestEnv::new();

    let bad = env.run_json_failure(&[
        "pin", "change", "--current", "0000", "--new", "12a4", "--confirm", "12a4",
    ]);
    assert_eq!(bad["error"]["kind"], "validation");
    assert_eq!(bad["error"]["message"], "PIN must be 4 digits");

    let mismatch = env.run_json_failure(&[
        "pin", "change", "--current", "0000", "--new", "1234", "--confirm", "4321",
    ]);
    assert_eq!(mismatch["error"]["message"], "New PINs do not match");

    let wrong = env.run_json_failure(&[
        "pin", "change", "--current", "9999", "--new", "1234", "--confirm", "1234",
    ]);
    assert_eq!(wrong["error"]["message"], "Current PIN is incorrect");

    let ok = env.run_json(&[
        "pin", "change", "--current", "0000", "--new", "4321", "--confirm", "4321",
    ]);
    assert_eq!(ok["data"], "changed");

    env.run_json_failure(&["pin", "verify", "--pin", DEFAULT_PIN]);
    env.run_json(&["pin", "verify", "--pin", "4321"]);
    env.run_json(&["block", "add", "youtube.com", "--pin", "4321"]);

    let audit = fs::read_to_string(env.data_dir().join("audit.jsonl")).expect("audit trail");
    assert!(audit.contains("pin_change"));
    assert!(!audit.contains("4321"));
}

#[test]
fn non_web_schemes_are_rejected() {
    let env = TestEnv::new();
    let ftp = env.run_json(&["check", "ftp://example.com"]);
    assert_eq!(ftp["data"]["accepted"], false);
    assert_eq!(ftp["data"]["reason"]["kind"], "unsupported_scheme");
    assert_eq!(ftp["data"]["reason"]["scheme"], "ftp");

    let bare = env.run_json(&["check", "kiddle.co"]);
    assert_eq!(bare["data"]["accepted"], false);

    let typed = env.run_json(&["check", "--typed", "kiddle.co"]);
    assert_eq!(typed["data"]["accepted"], true);
    assert_eq!(typed["data"]["url"], "https://kiddle.co");
}

#[test]
fn safe_mode_off_is_per_process_and_pin_gated() {
    let env = TestEnv::new();
    env.run_json(&["block", "add", "youtube.com", "--pin", DEFAULT_PIN]);

    let denied =
        env.run_json_failure(&["check", "https://youtube.com", "--safe-mode-off", "--pin", "1111"]);
    assert_eq!(denied["error"]["kind"], "auth_failure");

    let open =
        env.run_json(&["check", "https://youtube.com", "--safe-mode-off", "--pin", DEFAULT_PIN]);
    assert_eq!(open["data"]["accepted"], true);
    assert_eq!(open["data"]["reason"]["kind"], "safe_mode_off");

    let next = env.run_json(&["check", "https://youtube.com"]);
    assert_eq!(next["data"]["accepted"], false);
}

#[test]
fn session_drives_history_and_screen_time() {
    let env = TestEnv::new();
    let replies = env.run_session(
        "unlock 0000\n\
         block youtube.com\n\
         lock\n\
         go www.youtube.com\n\
         go kiddle.co\n\
         loaded https://kiddle.co/ Kiddle\n\
         tick 3\n\
         status\n\
         quit\n",
    );
    assert_eq!(replies.len(), 8);
    assert!(replies.iter().all(|r| r["ok"] == true));
    assert_eq!(replies[3]["data"]["accepted"], false);
    assert_eq!(replies[4]["data"]["accepted"], true);
    assert_eq!(replies[6]["data"]["total_seconds"], 3);
    assert_eq!(replies[7]["data"]["safe_mode"], true);
    assert_eq!(replies[7]["data"]["unlocked"], false);

    let report = env.run_json(&["screen-time"]);
    assert_eq!(report["data"]["total_seconds"], 3);
    assert_eq!(report["data"]["sites"][0]["site"], "kiddle.co");

    let history = env.run_json(&["history"]);
    assert_eq!(history["data"][0]["url"], "https://kiddle.co/");
    assert_eq!(history["data"][0]["title"], "Kiddle");
}

#[test]
fn session_reports_errors_and_keeps_going() {
    let env = TestEnv::new();
    let replies = env.run_session("block youtube.com\nsafe-mode off 9999\nsafe-mode off 0000\ngo ftp.example\n");
    assert_eq!(replies[0]["error"]["kind"], "auth_failure");
    assert_eq!(replies[1]["error"]["kind"], "auth_failure");
    assert_eq!(replies[2]["data"]["safe_mode"], false);
    assert_eq!(replies[3]["data"]["reason"]["kind"], "safe_mode_off");
}

#[test]
fn data_dir_flag_and_env_pin() {
    let env = TestEnv::new();
    let custom = env.home.join("elsewhere");

    env.cmd()
        .env("SAFENAV_PIN", DEFAULT_PIN)
        .args(["--data-dir", custom.to_str().expect("utf8 path")])
        .args(["block", "add", "youtube.com"])
        .assert()
        .success()
        .stdout(contains("youtube.com has been blocked."));

    assert!(custom.join("policy.json").exists());
    assert!(!env.data_dir().join("policy.json").exists());
}

#[test]
fn config_file_sets_data_dir() {
    let env = TestEnv::new();
    let custom = env.home.join("from-config");
    let cfg_dir = env.home.join(".config/safenav");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(
        cfg_dir.join("config.toml"),
        format!("[general]\ndata_dir = {:?}\n", custom.to_str().unwrap()),
    )
    .unwrap();

    env.run_json(&["block", "add", "reddit.com", "--pin", DEFAULT_PIN]);
    assert!(custom.join("policy.json").exists());
}

#[test]
fn text_output_for_check_and_screen_time() {
    let env = TestEnv::new();
    env.cmd()
        .args(["check", "https://kiddle.co"])
        .assert()
        .success()
        .stdout(contains("allowed\thttps://kiddle.co"));

    env.cmd()
        .arg("screen-time")
        .assert()
        .success()
        .stdout(contains("Total Screen Time: 0 hours 0 minutes"));

    env.cmd()
        .args(["block", "list", "--pin", DEFAULT_PIN])
        .assert()
        .success()
        .stdout(contains("No websites are blocked."));
}

#[test]
fn hand_edited_policy_applies_immediately() {
    let env = TestEnv::new();
    fs::create_dir_all(env.data_dir()).unwrap();
    fs::write(
        env.data_dir().join("policy.json"),
        r#"{"blocked_websites": ["WWW.Games.example"], "allowed_websites": []}"#,
    )
    .unwrap();

    let v = env.run_json(&["check", "https://play.games.example"]);
    assert_eq!(v["data"]["accepted"], false);

    let dup = env.run_json_failure(&["block", "add", "games.example", "--pin", DEFAULT_PIN]);
    assert_eq!(dup["error"]["kind"], "policy_conflict");

    env.run_json(&["block", "remove", "games.example", "--pin", DEFAULT_PIN]);
    let v = env.run_json(&["check", "https://play.games.example"]);
    assert_eq!(v["data"]["accepted"], true);
}

#[test]
fn corrupt_side_records_leave_commands_working() {
    let env = TestEnv::new();
    fs::create_dir_all(env.data_dir()).unwrap();
    fs::write(env.data_dir().join("screen_time.json"), "{broken").unwrap();
    fs::write(env.data_dir().join("history.json"), "not json").unwrap();

    env.run_json(&["block", "add", "youtube.com", "--pin", DEFAULT_PIN]);
    let v = env.run_json(&["check", "https://www.youtube.com"]);
    assert_eq!(v["data"]["accepted"], false);

    let report = env.run_json(&["screen-time"]);
    assert_eq!(report["data"]["total_seconds"], 0);
    let history = env.run_json(&["history"]);
    assert_eq!(history["data"], serde_json::json!([]));
}

#[test]
fn legacy_history_timestamps_are_accepted() {
    let env = TestEnv::new();
    fs::create_dir_all(env.data_dir()).unwrap();
    fs::write(
        env.data_dir().join("history.json"),
        r#"[{"timestamp": "2024-03-01T09:30:00.123456", "url": "https://kiddle.co/", "title": "Kiddle"}]"#,
    )
    .unwrap();

    let history = env.run_json(&["history"]);
    assert_eq!(history["data"][0]["timestamp"], "2024-03-01T09:30:00.123456Z");
    assert_eq!(history["data"][0]["title"], "Kiddle");
}
