//! Scenario runner: builds the initial state, advances it under a stop rule
//! and hands snapshots to a sink.

use anyhow::Context;
use chemotaxis_core::{
    run_until_converged, ConvergenceCriteria, ConvergenceReport, FieldState, FieldStats,
    InitialCondition, Integrator, ModelParameters, RunMetrics, SnapshotSchedule, SnapshotSink,
    StabilityReport,
};
use serde::{Deserialize, Serialize};

/// When a run ends.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopRule {
    /// A fixed number of steps.
    Steps { count: u64 },
    /// Until the resource field settles.
    Converged(ConvergenceCriteria),
}

impl Default for StopRule {
    fn default() -> Self {
        StopRule::Steps { count: 500 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: String,
    pub initial: InitialCondition,
    pub schedule: SnapshotSchedule,
    pub stop: StopRule,
    /// Update cells on the Rayon pool when the `parallel` feature is on.
    pub parallel: bool,
    /// Progress is logged every this many steps; zero disables it.
    pub log_every: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: "custom".to_string(),
            initial: InitialCondition::default(),
            schedule: SnapshotSchedule::default(),
            stop: StopRule::default(),
            parallel: true,
            log_every: 100,
        }
    }
}

impl ScenarioConfig {
    /// Replaces the seed of a random initial condition. Other initial
    /// conditions are left alone.
    pub fn reseed(&mut self, new_seed: u64) {
        match &mut self.initial {
            InitialCondition::RandomPopulation { seed } | InitialCondition::RandomBoth { seed } => {
                *seed = new_seed;
            }
            _ => {}
        }
    }
}

/// What a finished run looked like.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub name: String,
    pub final_state: FieldState,
    pub initial: FieldStats,
    pub last: FieldStats,
    pub stability: StabilityReport,
    pub snapshots: u64,
    /// Present for runs stopped by [`StopRule::Converged`].
    pub convergence: Option<ConvergenceReport>,
}

impl RunSummary {
    pub fn steps(&self) -> u64 {
        self.final_state.step_count()
    }

    /// Relative change of the total population over the run.
    pub fn population_drift(&self) -> f64 {
        self.last.population_drift(self.initial.total_population)
    }
}

struct Emitter<'a, S: SnapshotSink> {
    sink: &'a mut S,
    schedule: &'a SnapshotSchedule,
    total_steps: Option<u64>,
    metrics: RunMetrics,
}

impl<S: SnapshotSink> Emitter<'_, S> {
    fn offer(&mut self, state: &FieldState, stats: &FieldStats) -> anyhow::Result<()> {
        if self.schedule.is_due(state.step_count(), self.total_steps) {
            self.sink
                .emit(&state.snapshot())
                .with_context(|| format!("emitting snapshot at step {}", state.step_count()))?;
            self.metrics.record_snapshot(stats);
        }
        Ok(())
    }
}

/// Runs `scenario` on the lattice described by `params`, sending scheduled
/// snapshots to `sink`. The sink is finished before returning.
pub fn run_scenario<S: SnapshotSink>(
    params: &ModelParameters,
    scenario: &ScenarioConfig,
    sink: &mut S,
) -> anyhow::Result<RunSummary> {
    let stability = params.stability();
    if !stability.is_stable() {
        tracing::warn!(
            population_number = stability.population_number,
            resource_number = stability.resource_number,
            "Parameters violate the explicit-scheme stability bound; the run may blow up"
        );
    }

    let state = scenario
        .initial
        .build(params)
        .context("building initial condition")?;
    let integrator = Integrator::new(params).with_parallel(scenario.parallel);
    let initial = FieldStats::of(&state);

    tracing::info!(
        scenario = %scenario.name,
        grid = %params.shape(),
        k1 = params.k1(),
        k2 = params.k2(),
        k3 = params.k3(),
        v = params.v(),
        lambda = params.lambda(),
        "Starting scenario"
    );

    let total_steps = match &scenario.stop {
        StopRule::Steps { count } => Some(*count),
        StopRule::Converged(_) => None,
    };
    let mut emitter = Emitter {
        sink,
        schedule: &scenario.schedule,
        total_steps,
        metrics: RunMetrics::new(scenario.log_every),
    };
    emitter.offer(&state, &initial)?;

    let (final_state, convergence) = match &scenario.stop {
        StopRule::Steps { count } => {
            let final_state = run_steps(&integrator, state, *count, &mut emitter)?;
            (final_state, None)
        }
        StopRule::Converged(criteria) => {
            let (final_state, report) =
                run_until_converged(&integrator, state, criteria, |current, _change| {
                    let stats = FieldStats::of(current);
                    emitter.metrics.record_steps(criteria.batch.max(1) as u64, &stats);
                    emitter.offer(current, &stats)
                })?;
            if !report.converged {
                tracing::warn!(
                    batches = report.batches,
                    last_change = report.last_change,
                    "Resource field did not settle"
                );
            }
            (final_state, Some(report))
        }
    };

    emitter.sink.finish().context("finishing snapshot sink")?;

    let last = FieldStats::of(&final_state);
    let summary = RunSummary {
        name: scenario.name.clone(),
        final_state,
        initial,
        last,
        stability,
        snapshots: emitter.metrics.snapshots(),
        convergence,
    };
    tracing::info!(
        scenario = %summary.name,
        steps = summary.steps(),
        snapshots = summary.snapshots,
        population_drift = summary.population_drift(),
        elapsed_ms = emitter.metrics.elapsed().as_millis() as u64,
        "Scenario finished"
    );
    Ok(summary)
}

/// Advances to `count` completed steps, stopping at every scheduled step on
/// the way.
fn run_steps<S: SnapshotSink>(
    integrator: &Integrator,
    mut state: FieldState,
    count: u64,
    emitter: &mut Emitter<'_, S>,
) -> anyhow::Result<FieldState> {
    while state.step_count() < count {
        let current = state.step_count();
        let next = (current + 1..count)
            .find(|&s| emitter.schedule.is_due(s, emitter.total_steps))
            .unwrap_or(count);
        state = integrator.advance(state, (next - current) as usize);

        let stats = FieldStats::of(&state);
        emitter.metrics.record_steps(next - current, &stats);
        emitter.offer(&state, &stats)?;
    }
    Ok(state)
}
