//! Recoloring of binary reference tiles from source block colors

use crate::analysis::statistics::{ColorAssignment, ModeStrategy};
use crate::io::configuration::{BLACK, WHITE};
use crate::io::error::Result;
use crate::spatial::tiles::Tile;

/// Maps the two classes of a reference tile onto colors recovered from a source block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorRecoverer {
    /// Mode computation used for each class
    pub strategy: ModeStrategy,
}

impl ColorRecoverer {
    /// Create a recoverer with the given mode strategy
    pub const fn new(strategy: ModeStrategy) -> Self {
        Self { strategy }
    }

    /// Recolor `candidate` with the class colors sampled from `block`
    ///
    /// Black-class pixels take the black class mode, white-class pixels take the
    /// white class mode. A class without members has nothing to recolor, and
    /// pixels that are neither black nor white are copied unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the tiles differ in shape
    pub fn recolor(&self, candidate: &Tile, block: &Tile) -> Result<Tile> {
        let assignment = ColorAssignment::compute(candidate, block, self.strategy)?;
        Ok(apply_assignment(candidate, &assignment))
    }
}

/// Replace the black and white classes of `candidate` with the assigned colors
pub fn apply_assignment(candidate: &Tile, assignment: &ColorAssignment) -> Tile {
    let (rows, cols) = candidate.dim();
    Tile::from_fn(rows, cols, |r, c| {
        let original = candidate.pixel(r, c).unwrap_or(BLACK);
        match (original, assignment.black, assignment.white) {
            (BLACK, Some(color), _) | (WHITE, _, Some(color)) => color,
            _ => original,
        }
    })
}

/// Recolor with the default joint-mode strategy
///
/// # Errors
///
/// Returns `ShapeMismatch` if the tiles differ in shape
pub fn recolor(candidate: &Tile, block: &Tile) -> Result<Tile> {
    ColorRecoverer::default().recolor(candidate, block)
}
