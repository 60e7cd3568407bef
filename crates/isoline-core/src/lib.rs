//! Core contouring engine for isoline-rs.
//!
//! This crate implements marching squares over a scalar field sampled on a
//! regular grid:
//! - [`Grid`] samples a [`ScalarField`] once over a [`Domain`] at a [`Resolution`]
//! - [`CaseCode`] classifies cells and maps sign patterns to crossed sides
//! - [`Cell`] interpolates crossing points along cell sides
//! - [`Assembler`] strategies turn crossings into [`Segment`]s or an [`IndexedContour`]
//! - [`ContourEngine`] ties it together and extracts contours per level

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Grid indices are converted to coordinates throughout
#![allow(clippy::cast_precision_loss)]
// Corner/Side names read better fully spelled out
#![allow(clippy::module_name_repetitions)]

pub mod assemble;
pub mod classify;
pub mod engine;
pub mod error;
pub mod grid;
pub mod interpolate;
pub mod mesh;
pub mod options;

pub use assemble::{Assembler, Axis, GridEdge, IndexedAssembler, IndexedBand, SegmentAssembler};
pub use classify::{CaseCode, Corner, Side, SidePair};
pub use engine::ContourEngine;
pub use error::{ContourError, Result};
pub use grid::{Domain, Grid, Resolution, ScalarField};
pub use interpolate::{crossing_parameter, interpolate, Cell};
pub use mesh::{GpuVertex, IndexedContour, Segment};
pub use options::{ContourOptions, SaddleRule};

// Re-export glam types for convenience
pub use glam::{DVec2, Vec3};
