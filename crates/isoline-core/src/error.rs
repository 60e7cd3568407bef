//! Error types for isoline-rs.

use thiserror::Error;

/// The main error type for isoline-rs operations.
#[derive(Error, Debug)]
pub enum ContourError {
    /// A grid axis has fewer than two nodes.
    #[error("invalid resolution {nx}x{ny}: each axis needs at least 2 nodes")]
    InvalidResolution { nx: usize, ny: usize },

    /// A domain interval is empty, inverted, not finite or too wide to subdivide.
    #[error("invalid domain on {axis} axis: [{min}, {max}]")]
    InvalidDomain { axis: char, min: f64, max: f64 },

    /// The scalar field returned NaN or an infinity at a grid node.
    #[error("non-finite sample {value} at ({x}, {y})")]
    NonFiniteSample { x: f64, y: f64, value: f64 },

    /// The grid has more edges than a 32-bit index buffer can address.
    #[error("resolution {nx}x{ny} exceeds the 32-bit vertex index range")]
    ResolutionTooLarge { nx: usize, ny: usize },

    /// An edge refers to a node that does not exist.
    #[error("edge index {index} out of range for {num_nodes} nodes")]
    EdgeIndexOutOfRange { index: u32, num_nodes: usize },

    /// Combined vertices exceed what 32-bit indices can address.
    #[error("{count} vertices exceed the 32-bit index range")]
    TooManyVertices { count: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for isoline-rs operations.
pub type Result<T> = std::result::Result<T, ContourError>;
