use anyhow::{Context, Result};
use chemotaxis_core::snapshot::NullSink;
use chemotaxis_core::{init_logging, SnapshotSchedule};
use chemotaxis_io::SnapshotLog;
use chemotaxis_lib::{run_scenario, AppConfig, Preset, RunSummary, StopRule};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file; defaults are used when it does not exist
    #[arg(short, long, default_value = "chemotaxis.toml")]
    config: String,

    /// Run a built-in scenario instead of the configuration file
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// Run exactly this many steps
    #[arg(short, long)]
    steps: Option<u64>,

    /// Snapshot every N steps
    #[arg(long, conflicts_with = "evenly")]
    every: Option<u64>,

    /// Take N evenly spaced snapshots (fixed-length runs only)
    #[arg(long)]
    evenly: Option<u64>,

    /// Seed for random initial conditions
    #[arg(long)]
    seed: Option<u64>,

    /// Snapshot log (JSON Lines; a `.gz` suffix compresses it)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Update cells on a single thread
    #[arg(long)]
    serial: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Configuration file or preset, with command-line overrides applied.
fn effective_config(args: &Args) -> Result<AppConfig> {
    let mut config = match args.preset {
        Some(preset) => preset.config(),
        None => AppConfig::load(&args.config)
            .with_context(|| format!("loading configuration from {}", args.config))?,
    };

    let scenario = &mut config.scenario;
    if let Some(count) = args.steps {
        scenario.stop = StopRule::Steps { count };
    }
    if let Some(interval) = args.every {
        scenario.schedule = SnapshotSchedule::Every { interval };
    }
    if let Some(count) = args.evenly {
        scenario.schedule = SnapshotSchedule::Evenly { count };
    }
    if let Some(seed) = args.seed {
        scenario.reseed(seed);
    }
    if args.serial {
        scenario.parallel = false;
    }
    Ok(config)
}

fn print_summary(summary: &RunSummary) {
    println!("Scenario: {}", summary.name);
    println!("Grid: {}", summary.final_state.shape());
    println!(
        "Stability numbers: population {:.3}, resource {:.3}{}",
        summary.stability.population_number,
        summary.stability.resource_number,
        if summary.stability.is_stable() {
            ""
        } else {
            " (UNSTABLE)"
        }
    );
    println!("Steps: {} (t = {:.3})", summary.steps(), summary.final_state.time());
    if let Some(report) = &summary.convergence {
        println!(
            "Converged: {} after {} batches (last change {:.3e})",
            report.converged, report.batches, report.last_change
        );
    }
    println!(
        "Total population: {:.9} -> {:.9} (drift {:.3e})",
        summary.initial.total_population,
        summary.last.total_population,
        summary.population_drift()
    );
    println!(
        "Total resource: {:.6} -> {:.6}",
        summary.initial.total_resource, summary.last.total_resource
    );
    println!("Snapshots: {}", summary.snapshots);
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let config = effective_config(&args)?;
    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let params = config.model_parameters()?;
    let summary = match &args.output {
        Some(path) => {
            let mut log = SnapshotLog::create(path)
                .with_context(|| format!("creating snapshot log {}", path.display()))?;
            let summary = run_scenario(&params, &config.scenario, &mut log)?;
            println!("Wrote {} snapshots to {}", log.written(), path.display());
            summary
        }
        None => run_scenario(&params, &config.scenario, &mut NullSink)?,
    };

    print_summary(&summary);
    if summary.last.has_negative_population() || !summary.last.finite {
        eprintln!("Warning: the solution left the physical range; reduce dt or ds.");
    }
    Ok(())
}
