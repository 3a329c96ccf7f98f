//! Line protocol for `safenav session`.
//!
//! Each input line is one shell event (`go kiddle.co`, `loaded <url> <title>`,
//! `tick 5`, ...). Each event produces exactly one output line: a compact
//! `{ok, data}` / `{ok, error}` object with `--json`, plain text otherwise.
//! Errors are reported and the loop continues; only `quit`/EOF ends it.

use crate::*;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{BufRead, Write};

const HELP: &str = "commands: go <target> | click <url> | home | loaded <url> [title] | \
tick [n] | unlock <pin> | lock | block <domain> | allow <domain> | list | \
pin <current> <new> <confirm> | safe-mode on | safe-mode off <pin> | status | \
screen-time | history [n] | help | quit";

struct Reply {
    data: Value,
    text: String,
}

impl Reply {
    fn new<T: Serialize>(data: T, text: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            data: serde_json::to_value(data)?,
            text: text.into(),
        })
    }
}

pub fn run_shell<R: BufRead, W: Write>(
    json: bool,
    session: &mut Session,
    input: R,
    mut out: W,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if matches!(words[0], "quit" | "exit") {
            break;
        }

        match dispatch(session, &words) {
            Ok(reply) if json => {
                writeln!(out, "{}", json!({ "ok": true, "data": reply.data }))?;
            }
            Ok(reply) => writeln!(out, "{}", reply.text)?,
            Err(e) if json => {
                let body = services::output::error_body(&e);
                writeln!(out, "{}", json!({ "ok": false, "error": body }))?;
            }
            Err(e) => writeln!(out, "error: {}", e)?,
        }
        out.flush()?;
    }
    Ok(())
}

fn arg<'a>(words: &[&'a str], idx: usize, what: &str) -> anyhow::Result<&'a str> {
    words
        .get(idx)
        .copied()
        .ok_or_else(|| GuardError::Validation(format!("missing {}", what)).into())
}

fn navigation_reply(verdict: Verdict) -> anyhow::Result<Reply> {
    let text = if verdict.accepted {
        format!("allowed {}", verdict.url)
    } else {
        format!(
            "blocked {}: This website might not be safe for children! ({})",
            verdict.url,
            verdict.describe()
        )
    };
    Reply::new(verdict, text)
}

fn dispatch(session: &mut Session, words: &[&str]) -> anyhow::Result<Reply> {
    match words[0] {
        "go" => {
            arg(words, 1, "target")?;
            navigation_reply(session.navigate(&words[1..].join(" ")))
        }
        "click" => navigation_reply(session.follow_link(arg(words, 1, "url")?)),
        "home" => navigation_reply(session.home()),
        "loaded" => {
            let url = arg(words, 1, "url")?;
            let title = words[2..].join(" ");
            session.on_page_loaded(url, &title)?;
            Reply::new(
                json!({ "url": url, "title": title }),
                format!("loaded {}", url),
            )
        }
        "tick" => {
            let n = match words.get(1) {
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|_| GuardError::Validation(format!("invalid tick count: {}", raw)))?,
                None => 1,
            };
            for _ in 0..n {
                session.on_tick()?;
            }
            let status = session.status();
            let seconds = session.tracker().total_seconds();
            Reply::new(
                json!({
                    "ticks": n,
                    "active_site": status.active_site.map(|a| a.key),
                    "total_seconds": seconds,
                    "total_minutes": status.total_minutes,
                }),
                format!("Screen Time: {} minutes", status.total_minutes),
            )
        }
        "unlock" => {
            if !session.authenticate(arg(words, 1, "PIN")?) {
                return Err(GuardError::AuthFailure.into());
            }
            Reply::new(json!({ "unlocked": true }), "unlocked")
        }
        "lock" => {
            session.lock();
            Reply::new(json!({ "unlocked": false }), "locked")
        }
        "block" => {
            let domain = session.add_blocked(arg(words, 1, "domain")?)?;
            let text = format!("{} has been blocked.", domain);
            Reply::new(PolicyChange { action: "block".to_string(), domain }, text)
        }
        "allow" => {
            let domain = session.remove_blocked(arg(words, 1, "domain")?)?;
            let text = format!("{} has been allowed.", domain);
            Reply::new(PolicyChange { action: "allow".to_string(), domain }, text)
        }
        "list" => {
            let policy = session.policy()?;
            let text = format!(
                "blocked: {}\nallowed: {}",
                policy.blocked_domains.join(", "),
                policy.allowed_domains.join(", ")
            );
            Reply::new(policy, text)
        }
        "pin" => {
            session.change_pin(
                words.get(1).copied().unwrap_or_default(),
                words.get(2).copied().unwrap_or_default(),
                words.get(3).copied().unwrap_or_default(),
            )?;
            Reply::new("changed", "PIN has been changed successfully.")
        }
        "safe-mode" => match words.get(1).copied() {
            Some("on") => {
                session.enable_safe_mode();
                Reply::new(json!({ "safe_mode": true }), "Safe mode has been enabled.")
            }
            Some("off") => {
                session.disable_safe_mode(arg(words, 2, "PIN")?)?;
                Reply::new(
                    json!({ "safe_mode": false }),
                    "Safe mode has been disabled. Content filtering is now turned off.",
                )
            }
            _ => Err(GuardError::Validation("usage: safe-mode on | safe-mode off <pin>".to_string()).into()),
        },
        "status" => {
            let status = session.status();
            let text = format!(
                "safe_mode={} unlocked={} current={} screen_time={}m",
                status.safe_mode,
                status.unlocked,
                status.current_url.as_deref().unwrap_or("-"),
                status.total_minutes
            );
            Reply::new(status, text)
        }
        "screen-time" => {
            let report = session.screen_time();
            let text = runtime::screen_time_text(&report);
            Reply::new(report, text)
        }
        "history" => {
            let entries = match words.get(1) {
                Some(raw) => {
                    let n = raw
                        .parse::<usize>()
                        .map_err(|_| GuardError::Validation(format!("invalid count: {}", raw)))?;
                    session.recent_history(n)
                }
                None => session.history(),
            };
            let text = entries
                .iter()
                .map(history_line)
                .collect::<Vec<_>>()
                .join("\n");
            Reply::new(entries, text)
        }
        "help" => Reply::new(HELP, HELP),
        other => Err(GuardError::Validation(format!("unknown command: {}", other)).into()),
    }
}
