//! isoline: isocontour extraction for 2D scalar fields.
//!
//! Give isoline a scalar function, a rectangular domain and a grid resolution.
//! It samples the field once. Each extraction after that returns the line
//! segments where the field crosses the requested level.
//!
//! # Quick Start
//!
//! ```
//! use isoline::*;
//!
//! fn main() -> Result<()> {
//!     let engine = ContourEngine::new(
//!         |x: f64, y: f64| (x * x + y * y).sin() - (x * y).cos(),
//!         Domain::new([-10.0, 10.0], [-10.0, 10.0]),
//!         [250, 250],
//!     )?;
//!
//!     // Independent point pairs, e.g. for a plotting library
//!     let segments = engine.compute_segments(0.5);
//!
//!     // Shared vertices plus index pairs, e.g. for an indexed line-list draw
//!     let mesh = engine.compute_indexed(0.5);
//!     assert_eq!(segments.len(), mesh.num_edges());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Output modes
//!
//! - [`ContourEngine::compute_segments`] - one `(start, end)` pair per cell segment
//! - [`ContourEngine::compute_indexed`] - an [`IndexedContour`] with one vertex per
//!   crossed grid edge, ready for [`IndexedContour::gpu_vertices`] and
//!   [`IndexedContour::index_buffer`]
//!
//! # Beyond a single level
//!
//! - [`compute_levels`] sweeps a list of levels in parallel
//! - [`ContourNetwork`] lifts contours into a 3D curve network
//! - [`ContourDocument`] saves contours as JSON

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Level counts and indices are converted to f64 for spacing
#![allow(clippy::cast_precision_loss)]

pub mod export;
pub mod levels;
pub mod network;

// Re-export core types
pub use isoline_core::{
    assemble::{Assembler, Axis, GridEdge, IndexedAssembler, IndexedBand, SegmentAssembler},
    classify::{CaseCode, Corner, Side, SidePair},
    interpolate::{crossing_parameter, interpolate, Cell},
    error::{ContourError, Result},
    grid::{Domain, Grid, Resolution, ScalarField},
    mesh::{GpuVertex, IndexedContour, Segment},
    options::{ContourOptions, SaddleRule},
    ContourEngine, DVec2, Vec3,
};

pub use export::{write_levels_json, ContourDocument};
pub use levels::{compute_interior_levels, compute_levels, interior_levels, linspace, LevelContour};
pub use network::ContourNetwork;

/// Initializes `env_logger` from the `RUST_LOG` environment variable.
///
/// Calling it more than once is harmless.
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::debug!("isoline logging initialized");
    }
}
