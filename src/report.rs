//! Plain-text summaries of a snapshot log.

use chemotaxis_core::Snapshot;
use std::fmt::Write;

/// Per-log totals used by the `summarize` binary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogSummary {
    pub snapshots: usize,
    pub first_step: u64,
    pub last_step: u64,
    pub initial_population: f64,
    pub final_population: f64,
    /// Largest relative deviation of the total population from the first
    /// snapshot.
    pub max_population_drift: f64,
    pub final_resource: f64,
}

impl LogSummary {
    /// `None` for an empty log.
    pub fn of(snapshots: &[Snapshot]) -> Option<Self> {
        let first = snapshots.first()?;
        let last = snapshots.last()?;
        let scale = if first.total_population == 0.0 {
            1.0
        } else {
            first.total_population.abs()
        };
        let max_population_drift = snapshots
            .iter()
            .map(|s| (s.total_population - first.total_population).abs() / scale)
            .fold(0.0, f64::max);
        Some(Self {
            snapshots: snapshots.len(),
            first_step: first.step,
            last_step: last.step,
            initial_population: first.total_population,
            final_population: last.total_population,
            max_population_drift,
            final_resource: last.total_resource,
        })
    }
}

/// Markdown table with one row per snapshot followed by the [`LogSummary`].
pub fn render_report(snapshots: &[Snapshot]) -> String {
    let mut out = String::new();
    let Some(summary) = LogSummary::of(snapshots) else {
        out.push_str("# Chemotaxis Run Report\n\nNo snapshots recorded.\n");
        return out;
    };

    let _ = writeln!(out, "# Chemotaxis Run Report\n");
    let _ = writeln!(out, "Grid: {}\n", snapshots[0].shape);
    let _ = writeln!(
        out,
        "| Step | Time | Total population | Total resource | Peak population | Peak resource |"
    );
    let _ = writeln!(out, "|---:|---:|---:|---:|---:|---:|");
    for snap in snapshots {
        let (peak_p, peak_m) = snap.peaks();
        let _ = writeln!(
            out,
            "| {} | {:.3} | {:.6} | {:.6} | {:.6} | {:.6} |",
            snap.step, snap.time, snap.total_population, snap.total_resource, peak_p, peak_m
        );
    }

    let _ = writeln!(out, "\n## Summary\n");
    let _ = writeln!(out, "- Snapshots: {}", summary.snapshots);
    let _ = writeln!(out, "- Steps: {} to {}", summary.first_step, summary.last_step);
    let _ = writeln!(
        out,
        "- Total population: {:.9} -> {:.9}",
        summary.initial_population, summary.final_population
    );
    let _ = writeln!(
        out,
        "- Max population drift: {:.3e}",
        summary.max_population_drift
    );
    let _ = writeln!(out, "- Final total resource: {:.6}", summary.final_resource);
    out
}
