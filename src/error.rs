//! Error types for the raster core

use thiserror::Error;

/// Errors surfaced by scene and rasterizer operations
///
/// Degenerate or off-canvas geometry is never an error; it simply draws nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The scanline fill found an odd number of active edges, which means the
    /// polygon is self-intersecting or otherwise malformed.
    #[error("scanline fill invariant violated: {count} active edges at y={scanline}")]
    OddActiveEdges { scanline: i32, count: usize },

    #[error("hermite anchor {index} out of range ({len} anchors)")]
    TangentIndex { index: usize, len: usize },

    #[error("canvas size {width}x{height} has no pixels")]
    CanvasSize { width: u32, height: u32 },

    #[error("image data is {actual} bytes, expected {expected}")]
    ImageSize { expected: usize, actual: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
