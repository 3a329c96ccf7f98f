use crate::*;
use serde_json::json;

fn unlock(session: &mut Session, pin: &str) -> anyhow::Result<()> {
    if !session.authenticate(pin) {
        return Err(GuardError::AuthFailure.into());
    }
    Ok(())
}

pub fn handle_block_commands(cli: &Cli, session: &mut Session) -> anyhow::Result<bool> {
    let Commands::Block { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        BlockCommands::Add { domain, pin } => {
            unlock(session, pin)?;
            let domain = session.add_blocked(domain)?;
            let change = PolicyChange {
                action: "block".to_string(),
                domain,
            };
            print_one(cli.json, change, |c| format!("{} has been blocked.", c.domain))?;
        }
        BlockCommands::Remove { domain, pin } => {
            unlock(session, pin)?;
            let domain = session.remove_blocked(domain)?;
            let change = PolicyChange {
                action: "allow".to_string(),
                domain,
            };
            print_one(cli.json, change, |c| format!("{} has been allowed.", c.domain))?;
        }
        BlockCommands::List { pin } => {
            unlock(session, pin)?;
            let policy = session.policy()?;
            print_list(cli.json, &policy.blocked_domains, "No websites are blocked.", |d| {
                d.to_string()
            })?;
        }
    }

    Ok(true)
}

pub fn handle_allowed_commands(cli: &Cli, session: &mut Session) -> anyhow::Result<bool> {
    let Commands::Allowed { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        AllowedCommands::List { pin } => {
            unlock(session, pin)?;
            let policy = session.policy()?;
            print_list(cli.json, &policy.allowed_domains, "No websites have been allowed.", |d| {
                d.to_string()
            })?;
        }
    }

    Ok(true)
}

pub fn handle_pin_commands(cli: &Cli, session: &mut Session) -> anyhow::Result<bool> {
    let Commands::Pin { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        PinCommands::Verify { pin } => {
            unlock(session, pin)?;
            print_one(cli.json, "verified", |_| "PIN accepted".to_string())?;
        }
        PinCommands::Change {
            current,
            new,
            confirm,
        } => {
            // The current PIN is the credential here, so a wrong one surfaces
            // as a validation message rather than a bare auth failure.
            let gate = AuthGate::new(session.data_dir());
            gate.change_secret(current, new, confirm)?;
            storage_audit(session, "pin_change");
            print_one(cli.json, "changed", |_| {
                "PIN has been changed successfully.".to_string()
            })?;
        }
    }

    Ok(true)
}

fn storage_audit(session: &Session, action: &str) {
    services::storage::audit(session.data_dir(), action, json!({ "via": "cli" }));
}
