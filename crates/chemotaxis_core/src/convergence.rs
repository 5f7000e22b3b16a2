//! Run-to-steady-state driver.
//!
//! The state is advanced `batch` steps at a time. After each batch the largest
//! absolute change of the resource field is compared against `epsilon`; the run
//! stops once it falls below, or when `max_batches` have been spent.

use crate::diagnostics::max_abs_difference;
use crate::field::FieldState;
use crate::integrator::Integrator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceCriteria {
    /// Steps per batch; zero is treated as one.
    pub batch: usize,
    pub epsilon: f64,
    pub max_batches: usize,
}

impl Default for ConvergenceCriteria {
    fn default() -> Self {
        Self {
            batch: 10,
            epsilon: 1e-6,
            max_batches: 10_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceReport {
    pub converged: bool,
    pub batches: usize,
    pub steps: u64,
    /// Resource change over the last batch; infinite if no batch ran.
    pub last_change: f64,
}

/// Advances `state` until the resource field settles.
///
/// `on_batch` sees the state after every batch together with that batch's
/// resource change; an error from it aborts the run.
pub fn run_until_converged<F>(
    integrator: &Integrator,
    state: FieldState,
    criteria: &ConvergenceCriteria,
    mut on_batch: F,
) -> anyhow::Result<(FieldState, ConvergenceReport)>
where
    F: FnMut(&FieldState, f64) -> anyhow::Result<()>,
{
    let batch = criteria.batch.max(1);
    let start_step = state.step_count();
    let mut current = state;
    let mut report = ConvergenceReport {
        converged: false,
        batches: 0,
        steps: 0,
        last_change: f64::INFINITY,
    };

    while report.batches < criteria.max_batches {
        let previous_resource = current.resource().to_vec();
        current = integrator.advance(current, batch);
        report.batches += 1;
        report.steps = current.step_count() - start_step;
        report.last_change = max_abs_difference(&previous_resource, current.resource());

        tracing::debug!(
            batch = report.batches,
            change = report.last_change,
            total_population = current.total_population(),
            total_resource = current.total_resource(),
            "Convergence batch"
        );
        on_batch(&current, report.last_change)?;

        if !report.last_change.is_finite() {
            tracing::warn!(batch = report.batches, "Resource field diverged");
            break;
        }
        if report.last_change < criteria.epsilon {
            report.converged = true;
            break;
        }
    }

    Ok((current, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ModelParameters, PhysicalParameters};

    fn params() -> ModelParameters {
        ModelParameters::line(
            20.0,
            PhysicalParameters {
                diffusion_population: 0.3,
                diffusion_resource: 0.3,
                ds: 1.0,
                dt: 1.0,
                production_rate: 0.5,
                decay_rate: 0.5,
                sensitivity: 0.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_flat_population_converges_to_production_balance() {
        let params = params();
        let integrator = Integrator::new(&params);
        let state = FieldState::uniform(&params, 1.0, 0.0);
        let criteria = ConvergenceCriteria {
            batch: 10,
            epsilon: 1e-9,
            max_batches: 1_000,
        };
        let mut seen = 0;
        let (end, report) = run_until_converged(&integrator, state, &criteria, |_, _| {
            seen += 1;
            Ok(())
        })
        .unwrap();

        assert!(report.converged);
        assert_eq!(seen, report.batches);
        assert_eq!(report.steps, report.batches as u64 * 10);
        // 1D resource update: m = (1 - lambda - k3) m + 2 k3 m + v p  =>  m = v / (lambda - k3)
        for &m in end.resource() {
            assert!((m - 0.5 / 0.2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_budget_stops_run() {
        let params = params();
        let integrator = Integrator::new(&params);
        let state = FieldState::uniform(&params, 1.0, 0.0);
        let criteria = ConvergenceCriteria {
            batch: 1,
            epsilon: 0.0,
            max_batches: 3,
        };
        let (end, report) =
            run_until_converged(&integrator, state, &criteria, |_, _| Ok(())).unwrap();
        assert!(!report.converged);
        assert_eq!(report.batches, 3);
        assert_eq!(end.step_count(), 3);
    }

    #[test]
    fn test_callback_error_aborts() {
        let params = params();
        let integrator = Integrator::new(&params);
        let state = FieldState::zeros(&params);
        let result = run_until_converged(
            &integrator,
            state,
            &ConvergenceCriteria::default(),
            |_, _| anyhow::bail!("sink closed"),
        );
        assert!(result.is_err());
    }
}
