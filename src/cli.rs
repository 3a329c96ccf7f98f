use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "safenav",
    version,
    about = "Parental content filter: block lists, PIN gate, screen time and history"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "SAFENAV_CONFIG",
        help = "Config file (default ~/.config/safenav/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "SAFENAV_DATA_DIR",
        help = "Directory holding policy, PIN, screen time and history documents"
    )]
    pub data_dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Log filter directive, e.g. warn or safenav=debug (overrides RUST_LOG)"
    )]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate one navigation target against the block list.
    Check {
        url: String,
        #[arg(long, help = "Treat the target as URL-bar input (adds https:// when missing)")]
        typed: bool,
        #[arg(long, requires = "pin", help = "Evaluate with safe mode disabled")]
        safe_mode_off: bool,
        #[arg(long, env = "SAFENAV_PIN", hide_env_values = true)]
        pin: Option<String>,
    },
    /// Manage blocked domains.
    Block {
        #[command(subcommand)]
        command: BlockCommands,
    },
    /// Show domains that were explicitly unblocked.
    Allowed {
        #[command(subcommand)]
        command: AllowedCommands,
    },
    /// Verify or change the parental PIN.
    Pin {
        #[command(subcommand)]
        command: PinCommands,
    },
    /// Show browsing history.
    History {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show accumulated screen time.
    ScreenTime,
    /// Interactive session driven line by line from stdin.
    Session,
}

#[derive(Subcommand, Debug)]
pub enum BlockCommands {
    Add {
        domain: String,
        #[arg(long, env = "SAFENAV_PIN", hide_env_values = true)]
        pin: String,
    },
    Remove {
        domain: String,
        #[arg(long, env = "SAFENAV_PIN", hide_env_values = true)]
        pin: String,
    },
    List {
        #[arg(long, env = "SAFENAV_PIN", hide_env_values = true)]
        pin: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AllowedCommands {
    List {
        #[arg(long, env = "SAFENAV_PIN", hide_env_values = true)]
        pin: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PinCommands {
    Verify {
        #[arg(long, env = "SAFENAV_PIN", hide_env_values = true)]
        pin: String,
    },
    Change {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}
