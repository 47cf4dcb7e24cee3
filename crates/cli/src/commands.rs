//! Subcommand implementations.

use chrono::Utc;
use color_eyre::eyre::{eyre, WrapErr};
use colored::Colorize;
use er_core::export::{filter_by_tags, render, ExportFormat};
use er_core::state::{EventScheduler, RunOutcome};
use std::collections::BTreeMap;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::app::App;
use crate::trigger::TriggerCommand;
use crate::{Cli, Commands};

pub async fn dispatch(cli: Cli) -> color_eyre::Result<()> {
    let app = App::build(&cli).await?;

    match cli.command {
        Commands::Run => run_once(&app).await,
        Commands::Daemon { schedule, run_now } => daemon(&app, schedule, run_now).await,
        Commands::TestAgents => test_agents(&app).await,
        Commands::Export { format, days, tags } => export(&app, format, days, &tags).await,
        Commands::Agents => list_agents(&app),
        Commands::Remove { id } => remove(&app, &id).await,
    }
}

async fn run_once(app: &App) -> color_eyre::Result<()> {
    app.scheduler
        .initialize()
        .await
        .wrap_err("Failed to initialize scheduler")?;

    match app.scheduler.run_event_discovery().await {
        RunOutcome::Failed(message) => Err(eyre!("Event discovery failed: {message}")),
        outcome => {
            print_outcome(&outcome);
            println!(
                "Exports written to {}",
                app.config.output_dir().display().to_string().cyan()
            );
            Ok(())
        }
    }
}

fn print_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Completed(report) => {
            println!("{} Event discovery completed", "✓".green());
            println!("  Discovered:   {}", report.discovered.to_string().bold());
            println!("  Saved:        {}", report.saved);
            if report.failed_saves > 0 {
                println!("  Failed saves: {}", report.failed_saves.to_string().red());
            }
            println!("  Total stored: {}", report.total_stored);
            println!("  Upcoming:     {}", report.upcoming);
            for agent in &report.agents {
                println!(
                    "  {:<18} {:?} ({} found, {} failed sources)",
                    agent.name, agent.status, agent.found, agent.failed_sources
                );
            }
        }
        RunOutcome::Skipped => println!("{} Discovery already running, skipped", "•".yellow()),
        RunOutcome::Failed(message) => println!("{} Discovery failed: {message}", "✗".red()),
    }
}

async fn daemon(app: &App, schedule: Option<String>, run_now: bool) -> color_eyre::Result<()> {
    app.scheduler
        .initialize()
        .await
        .wrap_err("Failed to initialize scheduler")?;

    if run_now {
        print_outcome(&app.scheduler.run_event_discovery().await);
    }

    app.scheduler
        .start_cron_job(schedule.as_deref())
        .await
        .wrap_err("Failed to start cron job")?;
    println!(
        "Daemon running. Commands: {}, {}, {}",
        "refresh".bold(),
        "status".bold(),
        "quit".bold()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.wrap_err("Failed to read stdin")? else {
                    info!("stdin closed, shutting down");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<TriggerCommand>() {
                    Ok(TriggerCommand::Refresh) => spawn_refresh(&app.scheduler),
                    Ok(TriggerCommand::Status) => {
                        println!("{}", serde_json::to_string(&app.scheduler.get_status())?);
                    }
                    Ok(TriggerCommand::Quit) => break,
                    Err(message) => eprintln!("{}", message.yellow()),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }

    app.scheduler
        .stop_cron_job()
        .await
        .wrap_err("Failed to stop cron job")?;
    Ok(())
}

/// Refresh in the background so `status` stays responsive.
fn spawn_refresh(scheduler: &EventScheduler) {
    let scheduler = scheduler.clone();
    tokio::spawn(async move {
        print_outcome(&scheduler.run_event_discovery().await);
    });
}

async fn test_agents(app: &App) -> color_eyre::Result<()> {
    println!("{}", "Testing event discovery agents...".bold());

    let report = app.agents().run().await;

    println!(
        "\n{} Found {} unique events ({} before deduplication)",
        "✓".green(),
        report.events.len(),
        report.total_found
    );

    let mut by_source: BTreeMap<&str, usize> = BTreeMap::new();
    for event in &report.events {
        *by_source.entry(event.source.as_str()).or_default() += 1;
    }
    println!("\n{}", "Events by source:".bold());
    for (source, count) in &by_source {
        println!("  {source}: {count}");
    }

    if !report.events.is_empty() {
        println!("\n{}", "Sample events:".bold());
        for (index, event) in report.events.iter().take(5).enumerate() {
            println!("\n{}. {}", index + 1, event.title.bold());
            println!("   Date: {}", event.start_date.format("%Y-%m-%d %H:%M"));
            println!("   Location: {}", event.location);
            println!("   Source: {}", event.source);
            println!("   Tags: {}", event.tags.join(", "));
            println!("   URL: {}", event.url);
        }
    }

    Ok(())
}

async fn export(
    app: &App,
    format: ExportFormat,
    days: i64,
    tags: &[String],
) -> color_eyre::Result<()> {
    let store = app.store();
    store.initialize().await.wrap_err("Failed to initialize store")?;

    let events = if days > 0 {
        store.get_upcoming(days).await?
    } else {
        store.get_all().await?
    };
    let events = filter_by_tags(&events, tags);

    let output = render(format, app.config.calendar(), &events, Utc::now())?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn list_agents(app: &App) -> color_eyre::Result<()> {
    for agent in app.agents().get_agents() {
        let state = if agent.is_enabled() {
            "enabled".green()
        } else {
            "disabled".red()
        };
        println!("{} ({state})", agent.name().bold());
        for source in agent.get_sources() {
            println!("  - {} {}", source.name(), source.base_url().dimmed());
        }
    }
    Ok(())
}

async fn remove(app: &App, id: &str) -> color_eyre::Result<()> {
    if id.trim().is_empty() {
        return Err(eyre!("Event id must not be empty"));
    }

    let store = app.store();
    store.initialize().await.wrap_err("Failed to initialize store")?;
    store.delete(id).await?;
    println!("{} Removed event {}", "✓".green(), id);
    Ok(())
}
