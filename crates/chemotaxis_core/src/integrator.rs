//! Explicit FTCS time stepping on the periodic lattice.
//!
//! One step maps `(population, resource)` at time `t` to time `t + dt`. Every
//! output cell is computed from the previous state only, so the integrator
//! always writes into a separate buffer and swaps it in once the whole lattice
//! is done. This also makes each cell independent, which is what the rayon
//! path exploits: rows (2D) or cells (1D) are filled in parallel and the
//! result is bit-identical to the serial loop.
//!
//! Line, neighbours `j-1`, `j+1`:
//!
//! ```text
//! p'[j] = (1 - 2k1 - k2 (m[j-1] - m[j])) p[j] + k1 (p[j-1] + p[j+1])
//!         - k2 (m[j+1] - m[j]) p[j+1]
//! m'[j] = (1 - lambda - k3) m[j] + k3 (m[j-1] + m[j+1]) + v p[j]
//! ```
//!
//! Plane, neighbours `(i±1, j)` and `(i, j±1)`:
//!
//! ```text
//! p'[i,j] = p[i,j] (1 - 4k1 - k2 (m[i-1,j] - 2 m[i,j] + m[i,j-1]))
//!           + k1 (p[i-1,j] + p[i,j-1] + p[i+1,j] + p[i,j+1])
//!           - k2 (p[i+1,j] (m[i+1,j] - m[i,j]) + p[i,j+1] (m[i,j+1] - m[i,j]))
//! m'[i,j] = m[i,j] (1 - 4k3 - lambda) + k3 (m[i-1,j] + m[i,j-1] + m[i+1,j] + m[i,j+1])
//!           + v p[i,j]
//! ```
//!
//! The scheme is only stable when `2k1 <= 1` on a line and `4k1 <= 1` on a
//! plane (likewise `k3`). Outside that region values grow without bound or go
//! negative; nothing here clamps them.

use crate::field::FieldState;
use crate::lattice::{AxisRing, GridShape};
use crate::params::{Coefficients, ModelParameters};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Advances [`FieldState`]s with a fixed set of coefficients.
///
/// Neighbour tables for both axes are built once here and reused by every
/// step.
#[derive(Debug, Clone)]
pub struct Integrator {
    shape: GridShape,
    coefficients: Coefficients,
    dt: f64,
    rows: AxisRing,
    cols: AxisRing,
    parallel: bool,
}

impl Integrator {
    pub fn new(params: &ModelParameters) -> Self {
        let shape = params.shape();
        let coefficients = params.coefficients();
        tracing::debug!(
            grid = %shape,
            k1 = coefficients.k1,
            k2 = coefficients.k2,
            k3 = coefficients.k3,
            v = coefficients.v,
            lambda = coefficients.lambda,
            "Integrator ready"
        );
        Self {
            shape,
            coefficients,
            dt: params.dt(),
            rows: AxisRing::new(shape.nx()),
            cols: AxisRing::new(shape.ny()),
            parallel: true,
        }
    }

    /// Enables or disables the rayon path. Without the `parallel` feature the
    /// integrator is always serial.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel && cfg!(feature = "parallel")
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Computes the state one time step after `state`.
    ///
    /// # Panics
    /// If `state` was built for a different grid than this integrator.
    pub fn step(&self, state: &FieldState) -> FieldState {
        self.check_shape(state);
        let len = self.shape.len();
        let mut population = vec![0.0; len];
        let mut resource = vec![0.0; len];
        self.fill(state.population(), state.resource(), &mut population, &mut resource);
        FieldState::from_parts(
            self.shape,
            population,
            resource,
            state.time() + self.dt,
            state.step_count() + 1,
        )
    }

    /// Applies [`Integrator::step`] `n` times; `n == 0` returns a copy.
    pub fn steps(&self, state: &FieldState, n: usize) -> FieldState {
        self.advance(state.clone(), n)
    }

    /// Like [`Integrator::steps`] but consumes the state and ping-pongs
    /// between its buffers and one scratch pair.
    ///
    /// # Panics
    /// If `state` was built for a different grid than this integrator.
    pub fn advance(&self, state: FieldState, n: usize) -> FieldState {
        self.check_shape(&state);
        if n == 0 {
            return state;
        }
        let mut time = state.time();
        let mut step_count = state.step_count();
        let (mut population, mut resource) = state.into_parts();
        let mut next_population = vec![0.0; population.len()];
        let mut next_resource = vec![0.0; resource.len()];

        for _ in 0..n {
            self.fill(
                &population,
                &resource,
                &mut next_population,
                &mut next_resource,
            );
            std::mem::swap(&mut population, &mut next_population);
            std::mem::swap(&mut resource, &mut next_resource);
            time += self.dt;
            step_count += 1;
        }

        FieldState::from_parts(self.shape, population, resource, time, step_count)
    }

    fn check_shape(&self, state: &FieldState) {
        assert_eq!(
            state.shape(),
            self.shape,
            "field state grid does not match integrator grid"
        );
    }

    fn fill(&self, p: &[f64], m: &[f64], p_out: &mut [f64], m_out: &mut [f64]) {
        match self.shape {
            GridShape::Line { .. } => self.fill_line(p, m, p_out, m_out),
            GridShape::Plane { ny, .. } => self.fill_plane(ny, p, m, p_out, m_out),
        }
    }

    fn fill_line(&self, p: &[f64], m: &[f64], p_out: &mut [f64], m_out: &mut [f64]) {
        let c = &self.coefficients;
        let ring = &self.rows;

        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                p_out
                    .par_iter_mut()
                    .zip(m_out.par_iter_mut())
                    .enumerate()
                    .for_each(|(j, (pop, res))| {
                        (*pop, *res) = line_cell(c, j, ring.get(j), p, m);
                    });
                return;
            }
        }

        for (j, (pop, res)) in p_out.iter_mut().zip(m_out.iter_mut()).enumerate() {
            (*pop, *res) = line_cell(c, j, ring.get(j), p, m);
        }
    }

    fn fill_plane(&self, ny: usize, p: &[f64], m: &[f64], p_out: &mut [f64], m_out: &mut [f64]) {
        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                p_out
                    .par_chunks_mut(ny)
                    .zip(m_out.par_chunks_mut(ny))
                    .enumerate()
                    .for_each(|(i, (p_row, m_row))| {
                        self.fill_plane_row(i, ny, p, m, p_row, m_row)
                    });
                return;
            }
        }

        for (i, (p_row, m_row)) in p_out
            .chunks_mut(ny)
            .zip(m_out.chunks_mut(ny))
            .enumerate()
        {
            self.fill_plane_row(i, ny, p, m, p_row, m_row);
        }
    }

    fn fill_plane_row(
        &self,
        i: usize,
        ny: usize,
        p: &[f64],
        m: &[f64],
        p_row: &mut [f64],
        m_row: &mut [f64],
    ) {
        let c = &self.coefficients;
        let (im, ip) = self.rows.get(i);
        for (j, (pop, res)) in p_row.iter_mut().zip(m_row.iter_mut()).enumerate() {
            let (jm, jp) = self.cols.get(j);
            let stencil = PlaneStencil {
                center: i * ny + j,
                up: im * ny + j,
                down: ip * ny + j,
                left: i * ny + jm,
                right: i * ny + jp,
            };
            (*pop, *res) = plane_cell(c, &stencil, p, m);
        }
    }
}

/// Flat indices of a five-point stencil. `up`/`left` are the previous
/// neighbours along rows/columns, `down`/`right` the next ones.
struct PlaneStencil {
    center: usize,
    up: usize,
    down: usize,
    left: usize,
    right: usize,
}

#[inline(always)]
fn line_cell(c: &Coefficients, j: usize, (b, f): (usize, usize), p: &[f64], m: &[f64]) -> (f64, f64) {
    let population = (1.0 - 2.0 * c.k1 - c.k2 * (m[b] - m[j])) * p[j] + c.k1 * (p[b] + p[f])
        - c.k2 * (m[f] - m[j]) * p[f];
    let resource = (1.0 - c.lambda - c.k3) * m[j] + c.k3 * (m[b] + m[f]) + c.v * p[j];
    (population, resource)
}

#[inline(always)]
fn plane_cell(c: &Coefficients, s: &PlaneStencil, p: &[f64], m: &[f64]) -> (f64, f64) {
    let x = s.center;
    let population = p[x] * (1.0 - 4.0 * c.k1 - c.k2 * (m[s.up] - 2.0 * m[x] + m[s.left]))
        + c.k1 * (p[s.up] + p[s.left] + p[s.down] + p[s.right])
        - c.k2 * (p[s.down] * (m[s.down] - m[x]) + p[s.right] * (m[s.right] - m[x]));
    let resource = m[x] * (1.0 - 4.0 * c.k3 - c.lambda)
        + c.k3 * (m[s.up] + m[s.left] + m[s.down] + m[s.right])
        + c.v * p[x];
    (population, resource)
}

/// One step with a throwaway [`Integrator`].
pub fn step(state: &FieldState, params: &ModelParameters) -> FieldState {
    Integrator::new(params).step(state)
}

/// `n` steps with a throwaway [`Integrator`].
pub fn steps(state: &FieldState, params: &ModelParameters, n: usize) -> FieldState {
    Integrator::new(params).steps(state, n)
}
