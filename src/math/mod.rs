//! Mathematical utilities for tile comparison

/// Structural similarity index between rasters
pub mod ssim;
