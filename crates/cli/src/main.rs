//! Main entry point for the event-radar binary.

use clap::{Parser, Subcommand};
use er_core::export::ExportFormat;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands;
mod trigger;

#[derive(Parser)]
#[command(name = "event-radar")]
#[command(about = "Discover, deduplicate and publish events from multiple sources")]
#[command(version)]
pub struct Cli {
    /// Project root containing `.event-radar/`
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Use an in-memory store instead of the SQLite database
    #[arg(long, global = true)]
    pub memory: bool,

    /// Disable an agent by name (repeatable)
    #[arg(long, global = true, value_name = "AGENT")]
    pub disable: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one discovery pass and write the exports
    Run,

    /// Run discovery on a cron schedule and accept commands on stdin
    ///
    /// Commands: refresh, status, quit
    Daemon {
        /// Cron expression (five or six fields); defaults to the configured schedule
        #[arg(long)]
        schedule: Option<String>,

        /// Run once immediately before waiting for the schedule
        #[arg(long)]
        run_now: bool,
    },

    /// Run every agent without saving and print what was found
    TestAgents,

    /// Print stored events in one export format
    Export {
        /// ical, csv or json
        #[arg(short, long, default_value = "ical", value_parser = parse_format)]
        format: ExportFormat,

        /// Only events starting within this many days (0 = all)
        #[arg(short, long, default_value_t = 0)]
        days: i64,

        /// Only events with a tag containing one of these (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// List agents, their state and sources
    Agents,

    /// Delete a stored event by id
    Remove {
        /// Event id
        id: String,
    },
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    value.parse().map_err(|e: er_core::export::ExportError| e.to_string())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,er_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    commands::dispatch(cli).await
}
