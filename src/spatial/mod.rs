//! Spatial data structures and raster manipulation
//!
//! This module contains spatial-related functionality including:
//! - The square RGB tile raster
//! - Rotation and inversion variants of reference tiles
//! - Block grid partitioning, cropping and pasting

/// Block grid partitioning with edge clipping
pub mod grid;
/// Square RGB rasters and their geometric transforms
pub mod tiles;
/// Symmetry variants of reference tiles
pub mod variants;

pub use tiles::{Color, Tile};
