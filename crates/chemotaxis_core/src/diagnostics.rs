//! Aggregate statistics used to monitor a run.
//!
//! The FTCS update has no population source or sink, so the total population
//! should stay put up to rounding. [`FieldStats::population_drift`] measures how
//! far a run has wandered from its starting total; unstable parameter choices
//! show up here (and in [`FieldStats::finite`]) long before the fields blow up.

use crate::field::FieldState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    fn of(values: &[f64]) -> Self {
        values.iter().fold(
            Range {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |acc, &v| Range {
                min: acc.min.min(v),
                max: acc.max.max(v),
            },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub step: u64,
    pub time: f64,
    pub total_population: f64,
    pub total_resource: f64,
    pub population: Range,
    pub resource: Range,
    pub finite: bool,
}

impl FieldStats {
    pub fn of(state: &FieldState) -> Self {
        Self {
            step: state.step_count(),
            time: state.time(),
            total_population: state.total_population(),
            total_resource: state.total_resource(),
            population: Range::of(state.population()),
            resource: Range::of(state.resource()),
            finite: state.is_finite(),
        }
    }

    /// Relative change of total population against `initial_total`; absolute
    /// change when the initial total is zero.
    pub fn population_drift(&self, initial_total: f64) -> f64 {
        let delta = (self.total_population - initial_total).abs();
        if initial_total == 0.0 {
            delta
        } else {
            delta / initial_total.abs()
        }
    }

    /// True when any population cell went below zero, which only happens
    /// outside the stable parameter region.
    pub fn has_negative_population(&self) -> bool {
        self.population.min < 0.0
    }
}

/// Largest absolute per-cell difference between two resource fields.
pub fn max_abs_difference(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
