//! custody-cli — Command-line front end for the custody degradation simulator.
//!
//! Feeds a timeline of `(day, event)` pairs into the simulator and prints the
//! final custody state with its narration log.

mod config;
mod output;
mod timeline;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use custody_core::TimelineEvent;
use custody_sim::CustodySimulator;
use tracing::info;

use config::{CliConfig, GlobalArgs, LogFormat};

/// Custody degradation simulator.
#[derive(Parser)]
#[command(name = "custody-cli")]
#[command(version, about = "Watch custody of a secret erode under real-world failures.")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in demo timeline.
    Demo,
    /// Run a user-supplied timeline.
    Run(RunArgs),
    /// List failure event tags and the rule each one fires.
    Events,
}

#[derive(Args)]
struct RunArgs {
    /// Event as DAY:EVENT (e.g. 7:screenshot_seed). Repeatable.
    #[arg(short, long = "event", value_name = "DAY:EVENT", allow_hyphen_values = true)]
    events: Vec<TimelineEvent>,

    /// JSON file holding an array of {"day": N, "event": "tag"} objects.
    #[arg(short, long)]
    timeline: Option<PathBuf>,

    /// Day custody was last verified before the timeline starts.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    verified_day: i64,

    /// Assume a succession plan exists.
    #[arg(long)]
    succession: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::from(cli.global);

    init_logging(&config.log_level, config.log_format);

    match cli.command {
        Commands::Demo => simulate(&config, timeline::demo_timeline(), 0, false),
        Commands::Run(args) => {
            let events = timeline::collect_timeline(args.timeline.as_deref(), args.events)?;
            if events.is_empty() {
                bail!("No events given; pass --event DAY:EVENT or --timeline FILE");
            }
            simulate(&config, events, args.verified_day, args.succession)
        }
        Commands::Events => {
            print!("{}", output::render_events(config.output)?);
            Ok(())
        }
    }
}

/// Run one simulation and print its report.
fn simulate(
    config: &CliConfig,
    events: Vec<TimelineEvent>,
    verified_day: i64,
    succession: bool,
) -> Result<()> {
    let mut sim = CustodySimulator::new();
    sim.state_mut().mark_verified(verified_day);
    sim.state_mut().assumptions.succession_exists = succession;

    info!(events = events.len(), verified_day, succession, "cli: starting simulation");
    sim.run(events);

    let report = sim.into_report();
    info!(
        failure_mode = %report.state.failure_mode,
        applied = report.events_applied,
        "cli: simulation finished"
    );

    let rendered = output::render(&report, config.output)?;
    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
    Ok(())
}

/// Initialize tracing on stderr with the given level and output format.
///
/// `RUST_LOG` overrides `level_str` when set.
fn init_logging(level_str: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
