//! Edge interpolation and the per-cell view used while marching.

use glam::DVec2;

use crate::classify::{CaseCode, Corner, Side};
use crate::grid::Grid;

/// Parameter `t` in `[0, 1]` where the level crosses the edge from `v0` to `v1`.
///
/// Falls back to the midpoint when `v0 == v1`; the classifier never reports
/// such an edge as crossed.
#[inline]
#[must_use]
pub fn crossing_parameter(v0: f64, v1: f64, level: f64) -> f64 {
    let t = (level - v0) / (v1 - v0);
    if t.is_finite() {
        t.clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Point where the level crosses the segment `p0 -> p1` carrying values `v0 -> v1`.
#[inline]
#[must_use]
pub fn interpolate(p0: DVec2, p1: DVec2, v0: f64, v1: f64, level: f64) -> DVec2 {
    p0 + (p1 - p0) * crossing_parameter(v0, v1, level)
}

/// One grid cell classified against a level.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'g> {
    grid: &'g Grid,
    col: usize,
    row: usize,
    level: f64,
    values: [f64; 4],
    code: CaseCode,
}

impl<'g> Cell<'g> {
    /// Reads the corners of cell `(col, row)` and classifies them against `level`.
    #[inline]
    #[must_use]
    pub fn new(grid: &'g Grid, col: usize, row: usize, level: f64) -> Self {
        let values = Corner::ALL.map(|corner| {
            let (di, dj) = corner.offset();
            grid.value(col + di, row + dj)
        });
        Self {
            grid,
            col,
            row,
            level,
            values,
            code: CaseCode::classify(&values, level),
        }
    }

    /// Cell column.
    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Cell row.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    /// The level this cell was classified against.
    #[must_use]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Sign pattern of the corners.
    #[must_use]
    pub fn code(&self) -> CaseCode {
        self.code
    }

    /// Sampled value at `corner`.
    #[must_use]
    pub fn value(&self, corner: Corner) -> f64 {
        self.values[corner as usize]
    }

    /// Position of `corner`.
    #[must_use]
    pub fn position(&self, corner: Corner) -> DVec2 {
        let (di, dj) = corner.offset();
        self.grid.node(self.col + di, self.row + dj)
    }

    /// Whether the mean of the four corner values is at or above the level.
    #[must_use]
    pub fn center_above(&self) -> bool {
        self.values.iter().sum::<f64>() * 0.25 >= self.level
    }

    /// Crossing point on `side`.
    #[must_use]
    pub fn crossing(&self, side: Side) -> DVec2 {
        let (a, b) = side.corners();
        interpolate(
            self.position(a),
            self.position(b),
            self.value(a),
            self.value(b),
            self.level,
        )
    }
}
