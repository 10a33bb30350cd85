use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use roomly_core::views::MeetingDuration;

#[derive(Parser)]
#[command(name = "roomly")]
#[command(about = "Browse meeting rooms and book a slot")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// CLI profile name holding backend settings
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Supabase project URL (overrides env and profile)
    #[arg(long, global = true, value_name = "URL")]
    pub supabase_url: Option<String>,

    /// Supabase anon/public key (overrides env and profile)
    #[arg(long, global = true, value_name = "KEY")]
    pub supabase_anon_key: Option<String>,

    /// Display timezone as minutes east of UTC
    #[arg(long, global = true, value_name = "MINUTES", allow_hyphen_values = true)]
    pub utc_offset: Option<i32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every room
    Rooms {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List rooms free for a slot
    Available {
        /// Start time (RFC 3339, or YYYY-MM-DDTHH:MM in the display timezone)
        #[arg(short, long, value_name = "TIME")]
        start: String,
        /// Meeting length in minutes (15, 30, 45 or 60)
        #[arg(short, long, default_value = "30", value_name = "MINUTES")]
        duration: MeetingDuration,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the next meetings
    Upcoming {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Book a room
    #[command(alias = "book")]
    Reserve {
        /// Start time (RFC 3339, or YYYY-MM-DDTHH:MM in the display timezone)
        #[arg(short, long, value_name = "TIME")]
        start: String,
        /// Meeting length in minutes (15, 30, 45 or 60)
        #[arg(short, long, default_value = "30", value_name = "MINUTES")]
        duration: MeetingDuration,
        /// Room id or name
        #[arg(short, long, value_name = "ROOM")]
        room: String,
        /// Meeting title
        #[arg(short, long)]
        title: String,
        /// Optional meeting description
        #[arg(long)]
        description: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved settings for a profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
