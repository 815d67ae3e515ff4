use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "gh-radar",
    about = "Watch GitHub issue/PR events against per-repository rules and notify on matches"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Run the polling loop until interrupted (SIGHUP forces a refresh)
    Watch {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        interval_minutes: Option<u64>,
    },
    /// Run a single poll cycle and exit
    Once {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Verify configuration, credentials, notifier, and state db
    Check {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Create a starter config file
    Init {
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
        #[arg(long)]
        reset_state: bool,
    },
    /// Manage per-repository matching rules
    Rules {
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(subcommand)]
        command: RulesCommands,
    },
    /// Inspect and acknowledge unread notifications
    Inbox {
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(subcommand)]
        command: InboxCommands,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum RulesCommands {
    List,
    /// Create or replace the rule for one repository
    Set {
        repo: String,
        #[arg(long, value_delimiter = ',')]
        labeled: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        mentioned: Vec<String>,
        /// Comment substrings; pass '*' to match any non-empty comment
        #[arg(long, value_delimiter = ',')]
        comment_patterns: Vec<String>,
    },
    Remove {
        repo: String,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum InboxCommands {
    List,
    /// Mark one notification read (suppresses re-notification for 24h)
    Read {
        id: String,
    },
    /// Mark everything read
    Clear,
}
