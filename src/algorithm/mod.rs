//! Tile matching, recoloring and whole-image conversion

/// Whole-image conversion and the top-level entry point
pub mod executor;
/// Pluggable best-match search over the tileset
pub mod matcher;
/// Two-class recoloring of reference tiles
pub mod recolor;
