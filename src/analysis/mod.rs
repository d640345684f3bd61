//! Tileset construction and color statistics

/// Statistical mode and per-class color assignment
pub mod statistics;
/// Tileset slicing and variant expansion
pub mod tileset;
