use anyhow::Context;
use chemotaxis_io::read_snapshots;
use chemotaxis_lib::{render_report, LogSummary};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Snapshot log written by `chemotaxis --output`
    #[arg(short, long, default_value = "logs/snapshots.jsonl")]
    input: String,

    /// Write a Markdown report here instead of printing it
    #[arg(short, long)]
    output: Option<String>,

    /// Fail when the total population drifts by more than this fraction
    #[arg(long)]
    max_drift: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let snapshots = read_snapshots(&args.input)?;
    let report = render_report(&snapshots);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &report).with_context(|| format!("writing {path}"))?;
            println!("Report written to {path}");
        }
        None => print!("{report}"),
    }

    if let (Some(limit), Some(summary)) = (args.max_drift, LogSummary::of(&snapshots)) {
        if summary.max_population_drift > limit {
            anyhow::bail!(
                "population drift {:.3e} exceeds {limit:.3e}",
                summary.max_population_drift
            );
        }
    }
    Ok(())
}
