//! Periodic lattice topology.
//!
//! Every axis is a ring: the cell before index `0` is the last cell and the cell
//! after the last index is `0`. Fields are stored in flat row-major buffers, so a
//! 2D cell `(i, j)` lives at `i * ny + j`.

use serde::{Deserialize, Serialize};

/// Returns the `(previous, next)` periodic neighbours of `index` on an axis of
/// length `len`.
///
/// `index` may be any value; it is reduced modulo `len` first. `len` must be
/// positive.
#[inline(always)]
pub fn neighbors(index: usize, len: usize) -> (usize, usize) {
    debug_assert!(len > 0, "axis length must be positive");
    let index = index % len;
    let prev = if index == 0 { len - 1 } else { index - 1 };
    let next = if index + 1 == len { 0 } else { index + 1 };
    (prev, next)
}

/// Previous periodic neighbour, `(index - 1) mod len`.
#[inline(always)]
pub fn neighbor_prev(index: usize, len: usize) -> usize {
    neighbors(index, len).0
}

/// Next periodic neighbour, `(index + 1) mod len`.
#[inline(always)]
pub fn neighbor_next(index: usize, len: usize) -> usize {
    neighbors(index, len).1
}

/// Cached neighbour pairs for every index of one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisRing {
    pairs: Vec<(usize, usize)>,
}

impl AxisRing {
    pub fn new(len: usize) -> Self {
        Self {
            pairs: (0..len).map(|i| neighbors(i, len)).collect(),
        }
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> (usize, usize) {
        self.pairs[index]
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Grid dimensions of a lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridShape {
    /// A 1D ring of `nx` cells.
    Line { nx: usize },
    /// A 2D torus of `nx` rows by `ny` columns.
    Plane { nx: usize, ny: usize },
}

impl GridShape {
    /// Number of cells. Saturates for shapes no field could hold, which only
    /// arise from deserialized input.
    #[must_use]
    pub fn len(&self) -> usize {
        match *self {
            GridShape::Line { nx } => nx,
            GridShape::Plane { nx, ny } => nx.saturating_mul(ny),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of spatial dimensions (1 or 2).
    pub fn dimensions(&self) -> usize {
        match self {
            GridShape::Line { .. } => 1,
            GridShape::Plane { .. } => 2,
        }
    }

    /// Neighbours per cell in the centered stencil (2 on a line, 4 on a plane).
    pub fn stencil_neighbors(&self) -> usize {
        2 * self.dimensions()
    }

    pub fn nx(&self) -> usize {
        match *self {
            GridShape::Line { nx } | GridShape::Plane { nx, .. } => nx,
        }
    }

    /// Column count; a line has a single implicit column.
    pub fn ny(&self) -> usize {
        match *self {
            GridShape::Line { .. } => 1,
            GridShape::Plane { ny, .. } => ny,
        }
    }

    /// Flat row-major index of `(i, j)`. On a line `j` must be `0`.
    #[inline(always)]
    pub fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx() && j < self.ny(), "cell ({i}, {j}) out of range");
        i * self.ny() + j
    }

    /// Inverse of [`GridShape::index`].
    #[inline(always)]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        let ny = self.ny();
        (index / ny, index % ny)
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridShape::Line { nx } => write!(f, "{nx}"),
            GridShape::Plane { nx, ny } => write!(f, "{nx}x{ny}"),
        }
    }
}
