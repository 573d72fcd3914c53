//! lapctl - OpenLap lap timing CLI
//!
//! Command-line interface for the OpenLap engine: simulate drives, replay
//! recorded sessions, and inspect or manage the lap history on disk.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{ConfigCommands, LapsCommands};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "lapctl")]
#[command(about = "OpenLap lap timing CLI - simulate, replay, and inspect GPS lap sessions")]
#[command(version)]
#[command(long_about = "
lapctl is the command-line interface for the OpenLap lap timing engine.
It can synthesize a deterministic practice drive, replay recorded sessions
through the engine, and manage the lap history file.

Use the --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Machine-readable output
    #[arg(long, global = true, help = "Print JSON envelopes instead of tables")]
    json: bool,

    /// Increase log detail (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(
        long,
        global = true,
        env = "LAPCTL_CONFIG",
        default_value = "openlap.json"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a synthetic session through the engine
    Simulate {
        /// Timed laps to complete (overrides the configuration)
        #[arg(short, long)]
        laps: Option<u32>,

        /// RNG seed for the route jitter (overrides the configuration)
        #[arg(long)]
        seed: Option<u64>,

        /// Record the drive to a session file
        #[arg(long, value_name = "FILE")]
        session_out: Option<PathBuf>,

        /// Save the resulting lap history to a file
        #[arg(long, value_name = "FILE")]
        history_out: Option<PathBuf>,
    },

    /// Replay a recorded session through a fresh engine
    Replay {
        /// Session file produced by simulate --session-out
        file: PathBuf,

        /// Save the replayed lap history to a file
        #[arg(long, value_name = "FILE")]
        history_out: Option<PathBuf>,
    },

    /// Lap history inspection and management
    #[command(subcommand)]
    Laps(LapsCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Emit a completion script for a shell
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Maps the counted -v flag onto a default env filter; RUST_LOG wins when set.
fn init_tracing(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("lapctl={log_level},openlap_engine={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute_command(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = match e.downcast_ref::<CliError>() {
                Some(CliError::FileNotFound(_)) => 2,
                Some(CliError::InvalidConfiguration(_)) => 3,
                Some(CliError::ValidationError(_)) | Some(CliError::JsonError(_)) => 4,
                _ => 1,
            };

            std::process::exit(exit_code);
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Simulate {
            laps,
            seed,
            session_out,
            history_out,
        } => commands::simulate::execute(
            *laps,
            *seed,
            session_out.as_deref(),
            history_out.as_deref(),
            &cli.config,
            cli.json,
        ),
        Commands::Replay { file, history_out } => {
            commands::replay::execute(file, history_out.as_deref(), &cli.config, cli.json)
        }
        Commands::Laps(cmd) => commands::laps::execute(cmd, cli.json),
        Commands::Config(cmd) => commands::config::execute(cmd, &cli.config, cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}
