//! Tile-art reconstruction of raster images from a monochrome tileset
//!
//! The source image is cut into fixed-size blocks. Each block is replaced by
//! the tileset tile (or one of its rotated and inverted variants) that best
//! matches it under structural similarity, after recoloring the tile's black
//! and white classes with the dominant colors of the block.

#![forbid(unsafe_code)]

/// Tile matching, recoloring and whole-image conversion
pub mod algorithm;
/// Tileset construction and color statistics
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Similarity metrics
pub mod math;
/// Tile rasters, symmetry variants and block grids
pub mod spatial;

pub use algorithm::executor::{ConversionConfig, ConversionOutcome, convert};
pub use algorithm::matcher::{ExhaustiveSearch, MatchResult, SearchStrategy, find_best_match};
pub use algorithm::recolor::recolor;
pub use analysis::tileset::{Tileset, build_tileset};
pub use io::error::{Result, TileArtError};
pub use spatial::variants::generate_variants;
