//! Population and resource fields plus elapsed simulation time.

use crate::error::{ModelError, Result};
use crate::lattice::GridShape;
use crate::params::ModelParameters;
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};

/// The two fields of the model on a shared grid.
///
/// Both buffers are flat and row-major (see [`GridShape::index`]). A state is
/// only produced by its constructors or by the
/// [`Integrator`](crate::integrator::Integrator), so the buffers always match
/// the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    shape: GridShape,
    population: Vec<f64>,
    resource: Vec<f64>,
    time: f64,
    step_count: u64,
}

impl FieldState {
    /// Builds the initial state at `time = 0`.
    pub fn new(params: &ModelParameters, population: Vec<f64>, resource: Vec<f64>) -> Result<Self> {
        if population.len() != resource.len() {
            return Err(ModelError::FieldLengthMismatch {
                population: population.len(),
                resource: resource.len(),
            });
        }
        let shape = params.shape();
        if population.len() != shape.len() {
            return Err(ModelError::GridMismatch {
                shape,
                expected: shape.len(),
                actual: population.len(),
            });
        }
        Ok(Self::from_parts(shape, population, resource, 0.0, 0))
    }

    /// Builds a 2D state from nested rows, `rows[i][j]` being cell `(i, j)`.
    pub fn from_rows(
        params: &ModelParameters,
        population: &[Vec<f64>],
        resource: &[Vec<f64>],
    ) -> Result<Self> {
        let shape = params.shape();
        let GridShape::Plane { nx, ny } = shape else {
            return Err(ModelError::Dimensionality { expected: 2, shape });
        };
        let population = flatten(population, nx, ny)?;
        let resource = flatten(resource, nx, ny)?;
        Self::new(params, population, resource)
    }

    /// Both fields zero everywhere.
    #[must_use]
    pub fn zeros(params: &ModelParameters) -> Self {
        Self::uniform(params, 0.0, 0.0)
    }

    /// Both fields constant everywhere.
    #[must_use]
    pub fn uniform(params: &ModelParameters, population: f64, resource: f64) -> Self {
        let shape = params.shape();
        Self::from_parts(
            shape,
            vec![population; shape.len()],
            vec![resource; shape.len()],
            0.0,
            0,
        )
    }

    pub(crate) fn from_parts(
        shape: GridShape,
        population: Vec<f64>,
        resource: Vec<f64>,
        time: f64,
        step_count: u64,
    ) -> Self {
        debug_assert_eq!(population.len(), shape.len());
        debug_assert_eq!(resource.len(), shape.len());
        Self {
            shape,
            population,
            resource,
            time,
            step_count,
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.population, self.resource)
    }

    /// Grid the buffers are laid out on.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Population density, row-major.
    #[must_use]
    pub fn population(&self) -> &[f64] {
        &self.population
    }

    /// Resource concentration, row-major.
    #[must_use]
    pub fn resource(&self) -> &[f64] {
        &self.resource
    }

    /// Elapsed simulation time, `step_count * dt` accumulated step by step.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps taken since the initial state.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Population at `(i, j)`; `j` is 0 on a line. Panics outside the grid.
    #[must_use]
    pub fn population_at(&self, i: usize, j: usize) -> f64 {
        self.population[self.shape.index(i, j)]
    }

    /// Resource at `(i, j)`; `j` is 0 on a line. Panics outside the grid.
    #[must_use]
    pub fn resource_at(&self, i: usize, j: usize) -> f64 {
        self.resource[self.shape.index(i, j)]
    }

    /// Sum of the population field, conserved by the scheme.
    #[must_use]
    pub fn total_population(&self) -> f64 {
        self.population.iter().sum()
    }

    /// Sum of the resource field.
    #[must_use]
    pub fn total_resource(&self) -> f64 {
        self.resource.iter().sum()
    }

    /// False once any cell has gone NaN or infinite (an unstable run).
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.population
            .iter()
            .chain(self.resource.iter())
            .all(|v| v.is_finite())
    }

    /// Copies both fields into a [`Snapshot`].
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}

fn flatten(rows: &[Vec<f64>], nx: usize, ny: usize) -> Result<Vec<f64>> {
    if rows.len() != nx {
        return Err(ModelError::GridMismatch {
            shape: GridShape::Plane { nx, ny },
            expected: nx * ny,
            actual: rows.iter().map(Vec::len).sum(),
        });
    }
    let mut flat = Vec::with_capacity(nx * ny);
    for (row, values) in rows.iter().enumerate() {
        if values.len() != ny {
            return Err(ModelError::RowLengthMismatch {
                row,
                expected: ny,
                actual: values.len(),
            });
        }
        flat.extend_from_slice(values);
    }
    Ok(flat)
}
