//! Physical inputs and the derived FTCS coefficients.
//!
//! [`ModelParameters`] is built once from a [`Domain`] and a set of
//! [`PhysicalParameters`] and never changes afterwards. All derived values are
//! computed in the constructor, so they always agree with the inputs:
//!
//! | derived  | formula           | role                        |
//! |----------|-------------------|-----------------------------|
//! | `k1`     | `D_p * dt / ds^2` | population diffusion        |
//! | `k2`     | `gamma * dt / ds^2` (= `gamma * k1 / D_p`) | chemotaxis |
//! | `k3`     | `D_m * dt / ds^2` | resource diffusion          |
//! | `v`      | `alfa * dt`       | resource production         |
//! | `lambda` | `beta * dt`       | resource decay              |
//!
//! Grid dimensions are `ceil(extent / ds)` per axis.

use crate::error::{ModelError, Result};
use crate::lattice::GridShape;
use serde::{Deserialize, Serialize};

/// Spatial extent of the simulated domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Domain {
    Line { length: f64 },
    Plane { length_x: f64, length_y: f64 },
}

impl Default for Domain {
    fn default() -> Self {
        Domain::Line { length: 100.0 }
    }
}

/// The seven physical scalars of the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalParameters {
    /// `D_p`, population diffusion coefficient
    pub diffusion_population: f64,
    /// `D_m`, resource diffusion coefficient
    pub diffusion_resource: f64,
    /// `ds`, lattice spacing
    pub ds: f64,
    /// `dt`, time step
    pub dt: f64,
    /// `alfa`, per-capita resource production rate
    pub production_rate: f64,
    /// `beta`, resource decay rate
    pub decay_rate: f64,
    /// `gamma`, chemotactic sensitivity
    pub sensitivity: f64,
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            diffusion_population: 1.0,
            diffusion_resource: 1.0,
            ds: 1.0,
            dt: 0.3,
            production_rate: 1.0,
            decay_rate: 1.0,
            sensitivity: 1.0,
        }
    }
}

/// Dimensionless per-step coefficients consumed by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
    pub v: f64,
    pub lambda: f64,
}

/// Result of checking the explicit-scheme stability bounds.
///
/// The scheme is stable when each diffusion number (`2k` on a line, `4k` on a
/// plane) is at most one. Nothing enforces this; callers pick `ds` and `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StabilityReport {
    pub population_number: f64,
    pub resource_number: f64,
}

impl StabilityReport {
    /// Population diffusion number is at most one.
    #[must_use]
    pub fn population_stable(&self) -> bool {
        self.population_number <= 1.0
    }

    /// Resource diffusion number is at most one.
    #[must_use]
    pub fn resource_stable(&self) -> bool {
        self.resource_number <= 1.0
    }

    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.population_stable() && self.resource_stable()
    }
}

/// Immutable model parameters plus everything derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelParameters {
    domain: Domain,
    physical: PhysicalParameters,
    coefficients: Coefficients,
    shape: GridShape,
}

fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::NonFinite { name, value })
    }
}

fn ensure_extent(axis: &'static str, value: f64) -> Result<()> {
    ensure_finite(axis, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::NonPositiveExtent { axis, value })
    }
}

/// Largest cell count a field buffer can hold.
const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<f64>();

fn cells(axis: &'static str, extent: f64, ds: f64) -> Result<usize> {
    let count = (extent / ds).ceil();
    if count.is_finite() && count <= MAX_CELLS as f64 {
        Ok(count as usize)
    } else {
        Err(ModelError::GridTooLarge { axis, cells: count })
    }
}

impl ModelParameters {
    pub fn new(domain: Domain, physical: PhysicalParameters) -> Result<Self> {
        let PhysicalParameters {
            diffusion_population,
            diffusion_resource,
            ds,
            dt,
            production_rate,
            decay_rate,
            sensitivity,
        } = physical;

        ensure_finite("ds", ds)?;
        ensure_finite("dt", dt)?;
        if ds <= 0.0 {
            return Err(ModelError::NonPositiveSpatialStep(ds));
        }
        if dt <= 0.0 {
            return Err(ModelError::NonPositiveTimeStep(dt));
        }
        ensure_finite("diffusion_population", diffusion_population)?;
        ensure_finite("diffusion_resource", diffusion_resource)?;
        ensure_finite("production_rate", production_rate)?;
        ensure_finite("decay_rate", decay_rate)?;
        ensure_finite("sensitivity", sensitivity)?;

        let shape = match domain {
            Domain::Line { length } => {
                ensure_extent("length", length)?;
                GridShape::Line {
                    nx: cells("length", length, ds)?,
                }
            }
            Domain::Plane { length_x, length_y } => {
                ensure_extent("length_x", length_x)?;
                ensure_extent("length_y", length_y)?;
                let nx = cells("length_x", length_x, ds)?;
                let ny = cells("length_y", length_y, ds)?;
                match nx.checked_mul(ny) {
                    Some(total) if total <= MAX_CELLS => GridShape::Plane { nx, ny },
                    _ => {
                        return Err(ModelError::GridTooLarge {
                            axis: "length_x * length_y",
                            cells: nx as f64 * ny as f64,
                        })
                    }
                }
            }
        };

        let ds2 = ds * ds;
        let coefficients = Coefficients {
            k1: diffusion_population * dt / ds2,
            k2: sensitivity * dt / ds2,
            k3: diffusion_resource * dt / ds2,
            v: production_rate * dt,
            lambda: decay_rate * dt,
        };

        Ok(Self {
            domain,
            physical,
            coefficients,
            shape,
        })
    }

    /// Shorthand for a 1D ring of the given length.
    pub fn line(length: f64, physical: PhysicalParameters) -> Result<Self> {
        Self::new(Domain::Line { length }, physical)
    }

    /// Shorthand for a 2D torus.
    pub fn plane(length_x: f64, length_y: f64, physical: PhysicalParameters) -> Result<Self> {
        Self::new(Domain::Plane { length_x, length_y }, physical)
    }

    /// The extent this model was built for.
    #[must_use]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// The physical inputs, as given.
    #[must_use]
    pub fn physical(&self) -> &PhysicalParameters {
        &self.physical
    }

    /// All five per-step coefficients.
    #[must_use]
    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    /// Lattice shape derived from the extent and `ds`.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Lattice spacing.
    #[must_use]
    pub fn ds(&self) -> f64 {
        self.physical.ds
    }

    /// Time step.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.physical.dt
    }

    /// `D_p dt / ds^2`
    #[must_use]
    pub fn k1(&self) -> f64 {
        self.coefficients.k1
    }

    /// `gamma dt / ds^2`
    #[must_use]
    pub fn k2(&self) -> f64 {
        self.coefficients.k2
    }

    /// `D_m dt / ds^2`
    #[must_use]
    pub fn k3(&self) -> f64 {
        self.coefficients.k3
    }

    /// `alfa dt`
    #[must_use]
    pub fn v(&self) -> f64 {
        self.coefficients.v
    }

    /// `beta dt`
    #[must_use]
    pub fn lambda(&self) -> f64 {
        self.coefficients.lambda
    }

    /// Row count; the cell count on a line.
    #[must_use]
    pub fn nx(&self) -> usize {
        self.shape.nx()
    }

    /// Column count, `None` on a line.
    #[must_use]
    pub fn ny(&self) -> Option<usize> {
        match self.shape {
            GridShape::Line { .. } => None,
            GridShape::Plane { ny, .. } => Some(ny),
        }
    }

    /// Physical coordinate of every row index: `0, ds, 2ds, ...`.
    #[must_use]
    pub fn x_coordinates(&self) -> Vec<f64> {
        (0..self.shape.nx()).map(|i| i as f64 * self.ds()).collect()
    }

    /// Physical coordinate of every column index; empty on a line.
    #[must_use]
    pub fn y_coordinates(&self) -> Vec<f64> {
        self.ny()
            .map(|ny| (0..ny).map(|j| j as f64 * self.ds()).collect())
            .unwrap_or_default()
    }

    /// Diffusion numbers for this lattice; see [`StabilityReport`].
    #[must_use]
    pub fn stability(&self) -> StabilityReport {
        let stencil = self.shape.stencil_neighbors() as f64;
        StabilityReport {
            population_number: stencil * self.coefficients.k1,
            resource_number: stencil * self.coefficients.k3,
        }
    }
}
