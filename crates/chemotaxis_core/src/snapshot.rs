//! Copies of a running state, the sinks that receive them and the schedules
//! that decide which steps get copied.

use crate::field::FieldState;
use crate::lattice::GridShape;
use serde::{Deserialize, Serialize};

/// A copy of both fields at one instant, handed to [`SnapshotSink`]s.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub step: u64,
    pub time: f64,
    pub shape: GridShape,
    pub total_population: f64,
    pub total_resource: f64,
    pub population: Vec<f64>,
    pub resource: Vec<f64>,
}

impl Snapshot {
    pub fn capture(state: &FieldState) -> Self {
        Self {
            step: state.step_count(),
            time: state.time(),
            shape: state.shape(),
            total_population: state.total_population(),
            total_resource: state.total_resource(),
            population: state.population().to_vec(),
            resource: state.resource().to_vec(),
        }
    }

    /// Largest cell of each field, `(population, resource)`.
    pub fn peaks(&self) -> (f64, f64) {
        let max = |values: &[f64]| values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (max(&self.population), max(&self.resource))
    }
}

/// Receives snapshots from a running scenario; never sees the live state.
pub trait SnapshotSink {
    fn emit(&mut self, snapshot: &Snapshot) -> anyhow::Result<()>;

    /// Called once after the last snapshot.
    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Keeps every snapshot in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub snapshots: Vec<Snapshot>,
}

impl SnapshotSink for MemorySink {
    fn emit(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn emit(&mut self, _snapshot: &Snapshot) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for &mut S {
    fn emit(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        (**self).emit(snapshot)
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        (**self).finish()
    }
}

/// Which completed step counts produce a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotSchedule {
    /// Every `interval` steps, starting with step 0.
    Every { interval: u64 },
    /// `count` snapshots spread evenly over a run of known length, the first
    /// at step 0.
    Evenly { count: u64 },
    /// Exactly these step counts.
    AtSteps { steps: Vec<u64> },
    #[default]
    Never,
}

impl SnapshotSchedule {
    /// Whether the state after `step` completed steps is captured, for a run
    /// of `total_steps` (`None` when the length is not known in advance).
    pub fn is_due(&self, step: u64, total_steps: Option<u64>) -> bool {
        match self {
            SnapshotSchedule::Every { interval } => *interval > 0 && step % interval == 0,
            SnapshotSchedule::Evenly { count } => match total_steps {
                Some(total) if *count > 0 => {
                    (0..*count).any(|k| k * total / count == step)
                }
                _ => step == 0,
            },
            SnapshotSchedule::AtSteps { steps } => steps.contains(&step),
            SnapshotSchedule::Never => false,
        }
    }
}
