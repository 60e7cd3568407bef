//! The contouring engine.
//!
//! A [`ContourEngine`] samples its scalar field once at construction and can
//! then extract contours at any number of levels. A constructed engine is
//! always ready: sampling failures are reported by the constructor and no
//! engine value exists until sampling has succeeded.

use std::ops::Range;

use rayon::prelude::*;

use crate::assemble::{Assembler, IndexedAssembler, SegmentAssembler};
use crate::error::Result;
use crate::grid::{Domain, Grid, Resolution, ScalarField};
use crate::interpolate::Cell;
use crate::mesh::{IndexedContour, Segment};
use crate::options::ContourOptions;

/// Marching squares over a grid sampled once from a scalar field.
#[derive(Debug, Clone)]
pub struct ContourEngine {
    grid: Grid,
    options: ContourOptions,
}

impl ContourEngine {
    /// Samples `field` over `domain` at `resolution` nodes using default options.
    ///
    /// # Example
    ///
    /// ```
    /// use isoline_core::{ContourEngine, Domain};
    ///
    /// let engine = ContourEngine::new(
    ///     |x: f64, y: f64| x * x + y * y,
    ///     Domain::new([-1.0, 1.0], [-1.0, 1.0]),
    ///     [50, 50],
    /// )?;
    /// let circle = engine.compute_indexed(0.25);
    /// assert_eq!(circle.num_vertices(), circle.num_edges());
    /// # Ok::<(), isoline_core::ContourError>(())
    /// ```
    pub fn new<F>(field: F, domain: Domain, resolution: impl Into<Resolution>) -> Result<Self>
    where
        F: ScalarField,
    {
        Self::with_options(field, domain, resolution, ContourOptions::default())
    }

    /// Samples `field` with explicit options.
    pub fn with_options<F>(
        field: F,
        domain: Domain,
        resolution: impl Into<Resolution>,
        options: ContourOptions,
    ) -> Result<Self>
    where
        F: ScalarField,
    {
        let grid = Grid::sample(&field, domain, resolution.into(), options.parallel)?;
        Ok(Self { grid, options })
    }

    /// Wraps an already sampled grid.
    #[must_use]
    pub fn from_grid(grid: Grid, options: ContourOptions) -> Self {
        Self { grid, options }
    }

    /// Returns the sampled grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the engine options.
    #[must_use]
    pub fn options(&self) -> &ContourOptions {
        &self.options
    }

    /// Contour at `level` as independent point pairs.
    #[must_use]
    pub fn compute_segments(&self, level: f64) -> Vec<Segment> {
        self.compute_with::<SegmentAssembler>(level)
    }

    /// Contour at `level` as a deduplicated vertex buffer with index pairs.
    #[must_use]
    pub fn compute_indexed(&self, level: f64) -> IndexedContour {
        self.compute_with::<IndexedAssembler>(level)
    }

    /// Runs marching squares at `level`, feeding segments to assembler `A`.
    ///
    /// Each call starts from fresh assembler state, so results depend only on
    /// the grid, the options and `level`.
    pub fn compute_with<A: Assembler>(&self, level: f64) -> A::Output {
        let bands = self.bands();
        let num_bands = bands.len();

        let parts: Vec<A::Band> = if num_bands > 1 {
            bands
                .into_par_iter()
                .map(|rows| self.march::<A>(rows, level))
                .collect()
        } else {
            bands
                .into_iter()
                .map(|rows| self.march::<A>(rows, level))
                .collect()
        };

        log::trace!("extracted level {level} in {num_bands} band(s)");
        A::combine(parts)
    }

    /// Splits the cell rows into contiguous bands for parallel extraction.
    fn bands(&self) -> Vec<Range<usize>> {
        let rows = self.grid.resolution().cell_rows();
        let min_rows = self.options.min_rows_per_band.max(1);
        if !self.options.parallel || rows <= min_rows {
            return vec![0..rows];
        }
        let count = (rows / min_rows).clamp(1, rayon::current_num_threads().max(1));
        (0..count)
            .map(|k| (k * rows / count)..((k + 1) * rows / count))
            .collect()
    }

    fn march<A: Assembler>(&self, rows: Range<usize>, level: f64) -> A::Band {
        let cols = self.grid.resolution().cell_cols();
        let rule = self.options.saddle_rule;
        let mut assembler = A::new(&self.grid, rows.clone());
        for row in rows {
            assembler.begin_row(row);
            for col in 0..cols {
                let cell = Cell::new(&self.grid, col, row, level);
                let code = cell.code();
                if code.is_empty() {
                    continue;
                }
                let center_above = code.is_saddle() && cell.center_above();
                for &(from, to) in code.segments(rule, center_above) {
                    assembler.emit(&cell, from, to);
                }
            }
        }
        assembler.finish()
    }
}
