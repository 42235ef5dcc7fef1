//! gesture-replay: classify recorded touch traces from the command line

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gesture_engine::config::{EngineConfig, OptionValue};
use gesture_engine::engine::GestureEngine;
use gesture_engine::gesture::GestureEvent;
use gesture_engine::{health, trace};

#[derive(Debug, Parser)]
#[command(name = "gesture-replay", version, about = "Replay touch traces through the gesture engine")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify a JSON trace and print the gestures
    Replay {
        /// Trace file (JSON array of touch batches)
        file: PathBuf,

        /// Print one JSON object per gesture instead of a table
        #[arg(long)]
        json: bool,

        /// Configuration profile to load (defaults to GESTURE_PROFILE, then "release")
        #[arg(long)]
        profile: Option<String>,

        /// Override a threshold, e.g. --set tapDistance=20
        #[arg(long = "set", value_name = "NAME=VALUE")]
        overrides: Vec<String>,
    },
    /// Run the health check suite
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay {
            file,
            json,
            profile,
            overrides,
        } => run_replay(&file, json, profile.as_deref(), &overrides),
        Commands::Check => {
            let report = health::run_all_checks();
            health::print_report(&report);
            std::process::exit(report.exit_code());
        }
    }
}

fn run_replay(
    file: &Path,
    json: bool,
    profile: Option<&str>,
    overrides: &[String],
) -> anyhow::Result<()> {
    let config = match profile {
        Some(profile) => EngineConfig::load(profile)
            .with_context(|| format!("loading profile '{}'", profile))?,
        None => EngineConfig::load_from_env().context("loading profile from GESTURE_PROFILE")?,
    };
    info!(profile = %config.profile, "configuration ready");
    let mut engine = GestureEngine::new(config.gestures);

    let options = parse_overrides(overrides)?;
    let applied = engine.apply_options(options.iter().map(|(name, value)| (name.as_str(), value)));
    if applied.len() < options.len() {
        warn!(
            requested = options.len(),
            applied = applied.len(),
            "some threshold overrides were rejected"
        );
    }

    let batches = trace::load_trace(file)?;
    let events = engine.replay(&batches);
    info!(batches = batches.len(), gestures = events.len(), "trace replayed");

    if json {
        for event in &events {
            println!("{}", serde_json::to_string(event)?);
        }
    } else if events.is_empty() {
        println!("{}", "No gestures recognised".yellow());
    } else {
        println!("{}", format_events(&events));
    }
    Ok(())
}

fn parse_overrides(overrides: &[String]) -> anyhow::Result<Vec<(String, OptionValue)>> {
    overrides
        .iter()
        .map(|entry| {
            let (name, value) = entry
                .split_once('=')
                .with_context(|| format!("override '{}' is not NAME=VALUE", entry))?;
            let value = match value.trim() {
                "true" => OptionValue::Bool(true),
                "false" => OptionValue::Bool(false),
                other => other
                    .parse::<f64>()
                    .map(OptionValue::Number)
                    .unwrap_or_else(|_| OptionValue::from(other)),
            };
            Ok((name.trim().to_string(), value))
        })
        .collect()
}

fn format_events(events: &[GestureEvent]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Time", "Gesture", "Target", "Fingers", "Detail"]);

    for event in events {
        let target = event
            .target
            .map(|id| id.0.to_string())
            .unwrap_or_else(|| "-".to_string());
        builder.push_record([
            format!("{}ms", event.time),
            event.kind.to_string().bold().to_string(),
            target,
            event.count().to_string(),
            event.summary(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
