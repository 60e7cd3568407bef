//! Segment assembly strategies.
//!
//! The marching loop classifies cells and hands each segment to an
//! [`Assembler`]. [`SegmentAssembler`] stores literal point pairs;
//! [`IndexedAssembler`] shares one vertex per crossed grid edge and stores index
//! pairs. Extraction may be split into horizontal bands of cell rows: every band
//! gets its own assembler, and [`Assembler::combine`] stitches the band results
//! back together in row order.

#![allow(clippy::cast_possible_truncation)]

use std::ops::Range;

use glam::DVec2;

use crate::classify::Side;
use crate::grid::Grid;
use crate::interpolate::Cell;
use crate::mesh::{IndexedContour, Segment};

/// Marker for "no vertex yet" in edge-to-vertex tables.
const NO_VERTEX: u32 = u32::MAX;

/// Collects the segments produced while marching over a band of cell rows.
pub trait Assembler: Sized + Send {
    /// Result for one band.
    type Band: Send;
    /// Result for the whole grid.
    type Output;

    /// Creates an assembler for cell rows `rows` of `grid`.
    fn new(grid: &Grid, rows: Range<usize>) -> Self;

    /// Called before the cells of `row` are visited. Rows arrive in increasing
    /// order without gaps.
    fn begin_row(&mut self, _row: usize) {}

    /// Records one segment of `cell`, running from side `from` to side `to`.
    fn emit(&mut self, cell: &Cell<'_>, from: Side, to: Side);

    /// Finishes the band.
    fn finish(self) -> Self::Band;

    /// Joins band results, given in row order.
    fn combine(bands: Vec<Self::Band>) -> Self::Output;
}

/// Naive assembly: every segment owns its two endpoints.
#[derive(Debug, Default)]
pub struct SegmentAssembler {
    segments: Vec<Segment>,
}

impl Assembler for SegmentAssembler {
    type Band = Vec<Segment>;
    type Output = Vec<Segment>;

    fn new(_grid: &Grid, _rows: Range<usize>) -> Self {
        Self::default()
    }

    fn emit(&mut self, cell: &Cell<'_>, from: Side, to: Side) {
        self.segments
            .push(Segment::new(cell.crossing(from), cell.crossing(to)));
    }

    fn finish(self) -> Self::Band {
        self.segments
    }

    fn combine(bands: Vec<Self::Band>) -> Self::Output {
        if bands.len() == 1 {
            return bands.into_iter().next().unwrap_or_default();
        }
        let total = bands.iter().map(Vec::len).sum();
        let mut segments = Vec::with_capacity(total);
        for band in bands {
            segments.extend(band);
        }
        segments
    }
}

/// Orientation of a grid edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// From node `(col, row)` to node `(col + 1, row)`.
    Horizontal,
    /// From node `(col, row)` to node `(col, row + 1)`.
    Vertical,
}

/// Structural identity of a grid edge, independent of which cell refers to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridEdge {
    pub col: usize,
    pub row: usize,
    pub axis: Axis,
}

impl GridEdge {
    /// The grid edge on `side` of cell `(col, row)`.
    ///
    /// The top side of a cell and the bottom side of the cell above map to the
    /// same key, and likewise for right and left.
    #[must_use]
    pub fn of(col: usize, row: usize, side: Side) -> Self {
        let (col, row, axis) = match side {
            Side::Bottom => (col, row, Axis::Horizontal),
            Side::Top => (col, row + 1, Axis::Horizontal),
            Side::Left => (col, row, Axis::Vertical),
            Side::Right => (col + 1, row, Axis::Vertical),
        };
        Self { col, row, axis }
    }
}

/// Grid-edge to vertex-id table covering the cell row being marched.
///
/// Horizontal edges live on two node rows addressed by row parity; vertical
/// edges only for the current cell row. Memory is proportional to the grid
/// width, not its area.
#[derive(Debug)]
struct EdgeVertexMap {
    horizontal: [Vec<u32>; 2],
    vertical: Vec<u32>,
    row: usize,
}

impl EdgeVertexMap {
    fn new(cell_cols: usize, first_row: usize) -> Self {
        Self {
            horizontal: [vec![NO_VERTEX; cell_cols], vec![NO_VERTEX; cell_cols]],
            vertical: vec![NO_VERTEX; cell_cols + 1],
            row: first_row,
        }
    }

    /// Moves to cell row `row`, forgetting edges that no later cell can share.
    fn advance(&mut self, row: usize) {
        if row != self.row {
            debug_assert_eq!(row, self.row + 1, "cell rows must be visited in order");
            self.row = row;
            self.vertical.fill(NO_VERTEX);
            self.horizontal[(row + 1) % 2].fill(NO_VERTEX);
        }
    }

    fn slot(&mut self, edge: GridEdge) -> &mut u32 {
        match edge.axis {
            Axis::Horizontal => {
                debug_assert!(edge.row == self.row || edge.row == self.row + 1);
                &mut self.horizontal[edge.row % 2][edge.col]
            }
            Axis::Vertical => {
                debug_assert_eq!(edge.row, self.row);
                &mut self.vertical[edge.col]
            }
        }
    }

    /// Returns the vertex for `edge`, creating it with `create` on first visit.
    fn get_or_insert_with(&mut self, edge: GridEdge, create: impl FnOnce() -> u32) -> u32 {
        let slot = self.slot(edge);
        if *slot == NO_VERTEX {
            *slot = create();
        }
        *slot
    }

    /// Vertex ids on the horizontal edges of `node_row`, which must be the
    /// current cell row or the one above it.
    fn node_row(&self, node_row: usize) -> &[u32] {
        &self.horizontal[node_row % 2]
    }
}

/// Indexed result of one band, with the vertex ids found on its bottom and
/// top node rows so adjacent bands can be stitched.
#[derive(Debug, Clone, Default)]
pub struct IndexedBand {
    pub contour: IndexedContour,
    /// Local vertex id per cell column on the band's first node row.
    pub bottom: Vec<u32>,
    /// Local vertex id per cell column on the node row above the band.
    pub top: Vec<u32>,
}

/// Indexed assembly: one vertex per crossed grid edge.
#[derive(Debug)]
pub struct IndexedAssembler {
    rows: Range<usize>,
    map: EdgeVertexMap,
    vertices: Vec<DVec2>,
    edges: Vec<[u32; 2]>,
    bottom: Option<Vec<u32>>,
}

impl IndexedAssembler {
    fn vertex(&mut self, cell: &Cell<'_>, side: Side) -> u32 {
        let key = GridEdge::of(cell.col(), cell.row(), side);
        let vertices = &mut self.vertices;
        self.map.get_or_insert_with(key, || {
            let id = vertices.len() as u32;
            vertices.push(cell.crossing(side));
            id
        })
    }
}

impl Assembler for IndexedAssembler {
    type Band = IndexedBand;
    type Output = IndexedContour;

    fn new(grid: &Grid, rows: Range<usize>) -> Self {
        let cell_cols = grid.resolution().cell_cols();
        Self {
            map: EdgeVertexMap::new(cell_cols, rows.start),
            rows,
            vertices: Vec::new(),
            edges: Vec::new(),
            bottom: None,
        }
    }

    fn begin_row(&mut self, row: usize) {
        if row == self.rows.start + 1 {
            // The band's first node row is about to be recycled.
            self.bottom = Some(self.map.node_row(self.rows.start).to_vec());
        }
        self.map.advance(row);
    }

    fn emit(&mut self, cell: &Cell<'_>, from: Side, to: Side) {
        let a = self.vertex(cell, from);
        let b = self.vertex(cell, to);
        self.edges.push([a, b]);
    }

    fn finish(self) -> Self::Band {
        let Self {
            rows,
            map,
            vertices,
            edges,
            bottom,
        } = self;
        let (bottom, top) = if rows.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            let bottom = bottom.unwrap_or_else(|| map.node_row(rows.start).to_vec());
            (bottom, map.node_row(rows.end).to_vec())
        };
        IndexedBand {
            contour: IndexedContour { vertices, edges },
            bottom,
            top,
        }
    }

    fn combine(bands: Vec<Self::Band>) -> Self::Output {
        if bands.len() == 1 {
            return bands.into_iter().next().map(|b| b.contour).unwrap_or_default();
        }

        let mut merged = IndexedContour {
            vertices: Vec::with_capacity(bands.iter().map(|b| b.contour.num_vertices()).sum()),
            edges: Vec::with_capacity(bands.iter().map(|b| b.contour.num_edges()).sum()),
        };
        // Global ids on the node row shared with the next band.
        let mut shared: Option<Vec<u32>> = None;

        for band in bands {
            let IndexedBand {
                contour,
                bottom,
                top,
            } = band;
            let mut remap = vec![NO_VERTEX; contour.vertices.len()];

            // The lower band owns the shared row: reuse its vertices.
            if let Some(shared) = &shared {
                for (&local, &global) in bottom.iter().zip(shared) {
                    if local == NO_VERTEX {
                        continue;
                    }
                    if global == NO_VERTEX {
                        log::warn!("band boundary vertex {local} has no counterpart below");
                    } else {
                        remap[local as usize] = global;
                    }
                }
            }

            for (local, vertex) in contour.vertices.into_iter().enumerate() {
                if remap[local] == NO_VERTEX {
                    remap[local] = merged.vertices.len() as u32;
                    merged.vertices.push(vertex);
                }
            }

            merged.edges.extend(
                contour
                    .edges
                    .iter()
                    .map(|&[a, b]| [remap[a as usize], remap[b as usize]]),
            );

            shared = Some(
                top.iter()
                    .map(|&local| {
                        if local == NO_VERTEX {
                            NO_VERTEX
                        } else {
                            remap[local as usize]
                        }
                    })
                    .collect(),
            );
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Domain, Resolution};

    fn sample(field: impl Fn(f64, f64) -> f64 + Sync, n: usize) -> Grid {
        Grid::sample(
            &field,
            Domain::new([-1.0, 1.0], [-1.0, 1.0]),
            Resolution::new(n, n),
            false,
        )
        .unwrap()
    }

    fn march<A: Assembler>(grid: &Grid, rows: Range<usize>, level: f64) -> A::Band {
        let mut assembler = A::new(grid, rows.clone());
        for row in rows {
            assembler.begin_row(row);
            for col in 0..grid.resolution().cell_cols() {
                let cell = Cell::new(grid, col, row, level);
                for &(from, to) in cell
                    .code()
                    .segments(crate::SaddleRule::Diagonal, cell.center_above())
                {
                    assembler.emit(&cell, from, to);
                }
            }
        }
        assembler.finish()
    }

    #[test]
    fn test_grid_edge_keys_agree_across_cells() {
        assert_eq!(GridEdge::of(3, 4, Side::Top), GridEdge::of(3, 5, Side::Bottom));
        assert_eq!(GridEdge::of(3, 4, Side::Right), GridEdge::of(4, 4, Side::Left));
        assert_ne!(GridEdge::of(3, 4, Side::Left), GridEdge::of(3, 4, Side::Bottom));
    }

    #[test]
    fn test_edge_vertex_map_rolls_rows() {
        let mut map = EdgeVertexMap::new(4, 0);
        let mut next = 0;
        let mut create = || {
            next += 1;
            next
        };
        let top = GridEdge::of(1, 0, Side::Top);
        let id = map.get_or_insert_with(top, &mut create);
        assert_eq!(map.get_or_insert_with(top, &mut create), id);
        map.advance(1);
        // Still reachable as the bottom of row 1.
        assert_eq!(map.get_or_insert_with(GridEdge::of(1, 1, Side::Bottom), &mut create), id);
        map.advance(2);
        // Node row 1's slots now hold node row 3.
        assert_eq!(map.node_row(3)[1], NO_VERTEX);
    }

    #[test]
    fn test_indexed_circle_has_shared_vertices() {
        let grid = sample(|x, y| x * x + y * y, 21);
        let band = march::<IndexedAssembler>(&grid, 0..20, 0.25);
        let contour = band.contour;
        assert!(!contour.is_empty());
        assert_eq!(contour.validate(), Ok(()));
        // Closed curve: every vertex is shared by exactly two segments.
        assert_eq!(contour.num_vertices(), contour.num_edges());
        let naive = march::<SegmentAssembler>(&grid, 0..20, 0.25);
        assert_eq!(naive, contour.segments());
    }

    #[test]
    fn test_banded_matches_single_band() {
        let grid = sample(|x, y| (x * 5.0).sin() * (y * 4.0).cos() + 0.3 * x, 33);
        let level = 0.1;
        let single = IndexedAssembler::combine(vec![march::<IndexedAssembler>(&grid, 0..32, level)]);
        for cuts in [vec![0, 16, 32], vec![0, 1, 2, 31, 32], vec![0, 5, 11, 20, 32]] {
            let bands = cuts
                .windows(2)
                .map(|w| march::<IndexedAssembler>(&grid, w[0]..w[1], level))
                .collect();
            assert_eq!(IndexedAssembler::combine(bands), single, "cuts {cuts:?}");

            let naive_bands = cuts
                .windows(2)
                .map(|w| march::<SegmentAssembler>(&grid, w[0]..w[1], level))
                .collect();
            assert_eq!(SegmentAssembler::combine(naive_bands), single.segments());
        }
    }

    #[test]
    fn test_band_boundaries() {
        // x = 0.1 crosses the horizontal edges of column 1 on every node row.
        let grid = sample(|x, _| x, 4);
        let band = march::<IndexedAssembler>(&grid, 1..2, 0.1);
        assert_eq!(band.contour.num_edges(), 1);
        for ids in [&band.bottom, &band.top] {
            assert_eq!(ids.len(), 3);
            assert_ne!(ids[1], NO_VERTEX);
            assert_eq!(ids[0], NO_VERTEX);
            assert_eq!(ids[2], NO_VERTEX);
        }

        // y = 0.1 stays inside cell row 1 and never touches its node rows.
        let grid = sample(|_, y| y, 4);
        let band = march::<IndexedAssembler>(&grid, 1..2, 0.1);
        assert!(band.bottom.iter().all(|&id| id == NO_VERTEX));
        assert!(band.top.iter().all(|&id| id == NO_VERTEX));
        assert_eq!(band.contour.num_edges(), 3);
        assert_eq!(band.contour.num_vertices(), 4);
    }
}
