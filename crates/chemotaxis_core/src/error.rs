//! Error types for model construction.
//!
//! Stepping never fails; every error here is raised while building
//! [`ModelParameters`](crate::params::ModelParameters) or a
//! [`FieldState`](crate::field::FieldState).

use crate::lattice::GridShape;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Spatial step must be strictly positive
    #[error("spatial step ds must be positive, got {0}")]
    NonPositiveSpatialStep(f64),

    /// Time step must be strictly positive
    #[error("time step dt must be positive, got {0}")]
    NonPositiveTimeStep(f64),

    /// Domain extents must be strictly positive
    #[error("extent {axis} must be positive, got {value}")]
    NonPositiveExtent { axis: &'static str, value: f64 },

    /// NaN or infinite physical input
    #[error("parameter {name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// Population and resource arrays disagree with each other
    #[error("population has {population} cells but resource has {resource}")]
    FieldLengthMismatch { population: usize, resource: usize },

    /// Arrays disagree with the grid derived from the parameters
    #[error("field has {actual} cells, grid {shape} needs {expected}")]
    GridMismatch {
        shape: GridShape,
        expected: usize,
        actual: usize,
    },

    /// Nested rows are not rectangular or do not match the grid
    #[error("row {row} has {actual} columns, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A 2D operation on a 1D state or vice versa
    #[error("expected a {expected}D grid, got {shape}")]
    Dimensionality { expected: usize, shape: GridShape },

    /// Extent and spacing give more cells than a field can hold
    #[error("{axis} needs {cells} cells, more than a field can hold")]
    GridTooLarge { axis: &'static str, cells: f64 },

    /// A referenced cell lies outside the grid
    #[error("cell ({i}, {j}) is outside grid {shape}")]
    CellOutOfRange { i: usize, j: usize, shape: GridShape },
}

pub type Result<T> = std::result::Result<T, ModelError>;
