//! # Chemotaxis Core
//!
//! Numerical core of a Keller–Segel population/resource model on a periodic
//! lattice.
//!
//! A *population* density diffuses and drifts up the gradient of a *resource*
//! density; the resource diffuses, decays and is produced in proportion to the
//! local population. Both fields live on a 1D ring or a 2D torus and are
//! advanced with an explicit FTCS (forward-time, centered-space) scheme.
//!
//! This crate contains:
//! - Periodic lattice indexing
//! - Immutable model parameters and derived coefficients
//! - The field state and the FTCS integrator (Rayon-parallel across cells)
//! - Initial conditions, diagnostics and a run-to-convergence driver
//! - Snapshots and the sink trait used by outer layers
//!
//! ## Example
//!
//! ```
//! use chemotaxis_core::{FieldState, Integrator, ModelParameters, PhysicalParameters};
//!
//! let params = ModelParameters::line(100.0, PhysicalParameters::default()).unwrap();
//! let mut population = vec![0.0; 100];
//! population[20] = 1.0;
//! let state = FieldState::new(&params, population, vec![0.0; 100]).unwrap();
//!
//! let later = Integrator::new(&params).steps(&state, 50);
//! assert!((later.total_population() - 1.0).abs() < 1e-9);
//! assert!(later.total_resource() > 0.0);
//! ```

/// Run-to-steady-state driver
pub mod convergence;
/// Aggregate statistics over a field state
pub mod diagnostics;
/// Construction errors
pub mod error;
/// Population and resource fields
pub mod field;
/// Initial condition generators
pub mod initial;
/// The FTCS update
pub mod integrator;
/// Periodic neighbour indexing and grid shapes
pub mod lattice;
/// Run metrics and logging setup
pub mod metrics;
/// Physical inputs and derived coefficients
pub mod params;
/// Snapshots, sinks and schedules
pub mod snapshot;

pub use convergence::{run_until_converged, ConvergenceCriteria, ConvergenceReport};
pub use diagnostics::FieldStats;
pub use error::ModelError;
pub use field::FieldState;
pub use initial::{CellValue, InitialCondition};
pub use integrator::Integrator;
pub use lattice::GridShape;
pub use metrics::{init_logging, RunMetrics};
pub use params::{Domain, ModelParameters, PhysicalParameters, StabilityReport};
pub use snapshot::{Snapshot, SnapshotSchedule, SnapshotSink};
