//! Symmetry variants of reference tiles
//!
//! Every reference tile is expanded into 8 variants: the four quarter-turn
//! rotations and the color inversion of each. Rotation and inversion both
//! preserve the black/white-only property of reference tiles.

use crate::spatial::tiles::Tile;

/// Counter-clockwise rotation applied to a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Unrotated
    Deg0,
    /// One quarter turn
    Deg90,
    /// Half turn
    Deg180,
    /// Three quarter turns
    Deg270,
}

impl Rotation {
    /// Number of counter-clockwise quarter turns
    pub const fn quarter_turns(self) -> usize {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    /// Rotation angle in degrees
    pub const fn degrees(self) -> u32 {
        self.quarter_turns() as u32 * 90
    }
}

/// One of the 8 symmetry transforms of a reference tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform {
    /// Rotation applied first
    pub rotation: Rotation,
    /// Whether colors are inverted after rotating
    pub inverted: bool,
}

impl Transform {
    /// Apply the transform to a tile
    pub fn apply(self, tile: &Tile) -> Tile {
        let rotated = tile.rotated(self.rotation.quarter_turns());
        if self.inverted {
            rotated.inverted()
        } else {
            rotated
        }
    }
}

const fn transform(rotation: Rotation, inverted: bool) -> Transform {
    Transform { rotation, inverted }
}

/// All transforms in generation order: rotations first, then their inversions
pub const ALL_TRANSFORMS: [Transform; 8] = [
    transform(Rotation::Deg0, false),
    transform(Rotation::Deg90, false),
    transform(Rotation::Deg180, false),
    transform(Rotation::Deg270, false),
    transform(Rotation::Deg0, true),
    transform(Rotation::Deg90, true),
    transform(Rotation::Deg180, true),
    transform(Rotation::Deg270, true),
];

/// Produce the 8 symmetry variants of a tile in `ALL_TRANSFORMS` order
pub fn generate_variants(tile: &Tile) -> Vec<Tile> {
    ALL_TRANSFORMS.iter().map(|t| t.apply(tile)).collect()
}
