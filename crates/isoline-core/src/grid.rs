//! Domain, resolution and the sampled scalar grid.
//!
//! A [`Grid`] is built once from a [`ScalarField`] and is read-only afterwards.
//! Node values are stored row-major: the value at node `(i, j)` (column `i`,
//! row `j`) lives at index `j * nx + i`.

use glam::DVec2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ContourError, Result};

/// A scalar function of two coordinates.
///
/// Implemented for every `Fn(f64, f64) -> f64 + Sync`, so closures and plain
/// function pointers can be passed directly.
pub trait ScalarField: Sync {
    /// Evaluates the field at `(x, y)`.
    fn eval(&self, x: f64, y: f64) -> f64;
}

impl<F> ScalarField for F
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    #[inline]
    fn eval(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// Rectangular sampling domain `[x0, x1] x [y0, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Lower and upper bound in x.
    pub x: [f64; 2],
    /// Lower and upper bound in y.
    pub y: [f64; 2],
}

impl Domain {
    /// Creates a domain from `[min, max]` bounds per axis.
    #[must_use]
    pub fn new(x: [f64; 2], y: [f64; 2]) -> Self {
        Self { x, y }
    }

    /// Checks that both intervals are finite and non-empty.
    pub fn validate(&self) -> Result<()> {
        for (axis, [min, max]) in [('x', self.x), ('y', self.y)] {
            // The width must be finite too, or node spacing overflows.
            if !(min.is_finite() && max.is_finite() && min < max && (max - min).is_finite()) {
                return Err(ContourError::InvalidDomain { axis, min, max });
            }
        }
        Ok(())
    }

    /// Width and height of the domain.
    #[must_use]
    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.x[1] - self.x[0], self.y[1] - self.y[0])
    }
}

/// Number of grid nodes along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    /// Nodes along x.
    pub nx: usize,
    /// Nodes along y.
    pub ny: usize,
}

impl Resolution {
    /// Creates a resolution of `nx` by `ny` nodes.
    #[must_use]
    pub fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }

    /// Checks that each axis has at least one cell and that every grid edge
    /// can be addressed by a `u32` vertex index.
    pub fn validate(&self) -> Result<()> {
        let Self { nx, ny } = *self;
        if nx < 2 || ny < 2 {
            return Err(ContourError::InvalidResolution { nx, ny });
        }
        let horizontal = (nx - 1).checked_mul(ny);
        let vertical = nx.checked_mul(ny - 1);
        let total = horizontal
            .zip(vertical)
            .and_then(|(h, v)| h.checked_add(v));
        // u32::MAX is reserved as the "no vertex" marker.
        match total {
            Some(edges) if edges < u32::MAX as usize => Ok(()),
            _ => Err(ContourError::ResolutionTooLarge { nx, ny }),
        }
    }

    /// Number of cell columns (`nx - 1`).
    #[must_use]
    pub fn cell_cols(&self) -> usize {
        self.nx.saturating_sub(1)
    }

    /// Number of cell rows (`ny - 1`).
    #[must_use]
    pub fn cell_rows(&self) -> usize {
        self.ny.saturating_sub(1)
    }

    /// Total number of cells.
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.cell_cols() * self.cell_rows()
    }

    /// Total number of nodes.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nx * self.ny
    }
}

impl From<[usize; 2]> for Resolution {
    fn from([nx, ny]: [usize; 2]) -> Self {
        Self::new(nx, ny)
    }
}

/// Scalar field values sampled on a regular grid.
#[derive(Debug, Clone)]
pub struct Grid {
    domain: Domain,
    resolution: Resolution,
    xs: Vec<f64>,
    ys: Vec<f64>,
    values: Vec<f64>,
    value_range: (f64, f64),
}

impl Grid {
    /// Samples `field` once at every node of the grid.
    ///
    /// Exactly `nx * ny` evaluations are made. With `parallel` set, node rows are
    /// evaluated on the rayon thread pool.
    pub fn sample<F>(
        field: &F,
        domain: Domain,
        resolution: Resolution,
        parallel: bool,
    ) -> Result<Self>
    where
        F: ScalarField + ?Sized,
    {
        domain.validate()?;
        resolution.validate()?;

        let xs = axis_nodes(domain.x, resolution.nx);
        let ys = axis_nodes(domain.y, resolution.ny);

        let mut values = vec![0.0_f64; resolution.num_nodes()];
        let fill_row = |(j, row): (usize, &mut [f64])| {
            let y = ys[j];
            for (value, &x) in row.iter_mut().zip(&xs) {
                *value = field.eval(x, y);
            }
        };
        if parallel {
            values
                .par_chunks_mut(resolution.nx)
                .enumerate()
                .for_each(fill_row);
        } else {
            values.chunks_mut(resolution.nx).enumerate().for_each(fill_row);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(ContourError::NonFiniteSample {
                    x: xs[index % resolution.nx],
                    y: ys[index / resolution.nx],
                    value,
                });
            }
            min = min.min(value);
            max = max.max(value);
        }

        log::debug!(
            "sampled {}x{} grid ({} nodes), values in [{min}, {max}]",
            resolution.nx,
            resolution.ny,
            values.len()
        );

        Ok(Self {
            domain,
            resolution,
            xs,
            ys,
            values,
            value_range: (min, max),
        })
    }

    /// Returns the sampled domain.
    #[must_use]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Returns the node resolution.
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Node x coordinates, one per column.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Node y coordinates, one per row.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// All node values in row-major order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at node `(i, j)`.
    #[inline]
    #[must_use]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.resolution.nx + i]
    }

    /// Position of node `(i, j)`.
    #[inline]
    #[must_use]
    pub fn node(&self, i: usize, j: usize) -> DVec2 {
        DVec2::new(self.xs[i], self.ys[j])
    }

    /// Smallest and largest sampled value.
    #[must_use]
    pub fn value_range(&self) -> (f64, f64) {
        self.value_range
    }

    /// Total number of cells.
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.resolution.num_cells()
    }
}

/// Node coordinates `min + i * (max - min) / (n - 1)` for `i` in `0..n`.
fn axis_nodes([min, max]: [f64; 2], n: usize) -> Vec<f64> {
    let last = (n - 1) as f64;
    (0..n)
        .map(|i| min + (i as f64) * (max - min) / last)
        .collect()
}
