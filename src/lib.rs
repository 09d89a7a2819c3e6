//! 2D raster primitives: scan conversion, clipping, parametric curves and
//! affine transforms over a flat pixel buffer, driven by a small scene
//! state machine.

pub mod clip;
pub mod config;
pub mod curves;
pub mod display;
pub mod error;
pub mod geometry;
pub mod input;
#[cfg(feature = "shell")]
pub mod mqtt;
pub mod raster;
pub mod remote;
pub mod scene;
pub mod transform;

pub use error::{Error, Result};
