//! Roomly CLI - browse meeting rooms and book a slot from the terminal.

mod cli;
mod commands;
mod config_profiles;
mod error;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::available::run_available;
use crate::commands::common::{load_settings, open_store, GlobalFlags};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::reserve::{run_reserve, ReserveRequest};
use crate::commands::rooms::run_rooms;
use crate::commands::upcoming::run_upcoming;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "roomly=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let flags = GlobalFlags {
        profile: cli.profile,
        supabase_url: cli.supabase_url,
        supabase_anon_key: cli.supabase_anon_key,
        utc_offset: cli.utc_offset,
    };

    let lines = match cli.command {
        Some(Commands::Completions { shell, output }) => {
            return run_completions(shell, output.as_deref());
        }
        Some(Commands::Config { command }) => run_config(command, &flags)?,
        Some(command) => run_backend_command(command, &flags).await?,
        None => {
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}

async fn run_backend_command(
    command: Commands,
    flags: &GlobalFlags,
) -> Result<Vec<String>, CliError> {
    let settings = load_settings(flags)?;
    tracing::info!(profile = %settings.profile_name, "Using profile");
    let store = open_store(&settings)?;
    let display = settings.display;

    match command {
        Commands::Rooms { json } => run_rooms(&store, json).await,
        Commands::Available {
            start,
            duration,
            json,
        } => run_available(&store, &display, &start, duration, json).await,
        Commands::Upcoming { json } => run_upcoming(&store, &display, json).await,
        Commands::Reserve {
            start,
            duration,
            room,
            title,
            description,
        } => {
            let request = ReserveRequest {
                start,
                duration,
                room,
                title,
                description,
            };
            run_reserve(&store, &display, request).await
        }
        Commands::Completions { .. } | Commands::Config { .. } => Ok(Vec::new()),
    }
}
