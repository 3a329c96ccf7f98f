use crate::*;

pub fn handle_runtime_commands(cli: &Cli, session: &mut Session) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Check {
            url,
            typed,
            safe_mode_off,
            pin,
        } => {
            if *safe_mode_off {
                let pin = pin.as_deref().unwrap_or_default();
                session.disable_safe_mode(pin)?;
            }
            let target = if *typed {
                complete_target(url)
            } else {
                url.clone()
            };
            let verdict = session.evaluate_navigation(&target);
            print_one(cli.json, verdict, verdict_line)?;
        }
        Commands::History { limit } => {
            let entries = match limit {
                Some(n) => session.recent_history(*n),
                None => session.history(),
            };
            print_list(cli.json, entries, "No browsing history yet.", history_line)?;
        }
        Commands::ScreenTime => {
            let report = session.screen_time();
            print_one(cli.json, report, screen_time_text)?;
        }
        Commands::Session => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            shell::run_shell(cli.json, session, stdin.lock(), stdout.lock())?;
        }
        Commands::Block { .. } | Commands::Allowed { .. } | Commands::Pin { .. } => {}
    }
    Ok(())
}

pub fn verdict_line(v: &Verdict) -> String {
    let status = if v.accepted { "allowed" } else { "blocked" };
    format!("{}\t{}\t{}", status, v.url, v.describe())
}

pub fn screen_time_text(r: &ScreenTimeReport) -> String {
    let mut out = format!("Total Screen Time: {} hours {} minutes", r.hours, r.minutes);
    for s in &r.sites {
        out.push('\n');
        out.push_str(&format!("{}\t{}", s.site, s.label));
    }
    out
}
