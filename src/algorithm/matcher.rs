//! Best-match search of a source block against the candidate tileset
//!
//! Every candidate is first recolored from the block, then scored against the
//! unmodified block with structural similarity. The search is exposed through
//! `SearchStrategy` so that an indexed search can replace the exhaustive scan
//! without touching callers.

use crate::algorithm::recolor::ColorRecoverer;
use crate::analysis::tileset::Tileset;
use crate::io::configuration::PERFECT_SCORE;
use crate::io::error::{Result, TileArtError, shape_mismatch};
use crate::math::ssim::{SsimParams, structural_similarity};
use crate::spatial::tiles::Tile;
use log::trace;

/// Best colorized candidate found for a source block
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Recolored candidate tile
    pub tile: Tile,
    /// Structural similarity between `tile` and the source block
    pub score: f64,
    /// Index of the winning candidate in the tileset
    pub candidate_index: usize,
    /// Number of candidates scored before the search finished
    pub evaluated: usize,
}

impl MatchResult {
    /// Whether the match reached the maximum attainable score
    pub fn is_perfect(&self) -> bool {
        self.score >= PERFECT_SCORE
    }
}

/// Strategy for finding the best tile for one source block
///
/// Implementations are shared across worker threads during conversion.
pub trait SearchStrategy: Sync {
    /// Find and recolor the best candidate for `block`
    ///
    /// # Errors
    ///
    /// Returns an error if no candidate exists or shapes are incompatible
    fn search(&self, block: &Tile) -> Result<MatchResult>;
}

/// Scores every candidate in tileset order, stopping at the first perfect score
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveSearch<'a> {
    tileset: &'a Tileset,
    recoverer: ColorRecoverer,
    params: SsimParams,
}

impl<'a> ExhaustiveSearch<'a> {
    /// Create a search over `tileset` with default recoloring and SSIM parameters
    pub fn new(tileset: &'a Tileset) -> Self {
        Self {
            tileset,
            recoverer: ColorRecoverer::default(),
            params: SsimParams::default(),
        }
    }

    /// Replace the color recoverer
    #[must_use]
    pub const fn with_recoverer(mut self, recoverer: ColorRecoverer) -> Self {
        self.recoverer = recoverer;
        self
    }

    /// Replace the SSIM parameters
    #[must_use]
    pub const fn with_params(mut self, params: SsimParams) -> Self {
        self.params = params;
        self
    }

    /// Tileset searched by this strategy
    pub const fn tileset(&self) -> &'a Tileset {
        self.tileset
    }
}

impl SearchStrategy for ExhaustiveSearch<'_> {
    fn search(&self, block: &Tile) -> Result<MatchResult> {
        let mut best: Option<MatchResult> = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut evaluated = 0;

        for (index, variant) in self.tileset.iter().enumerate() {
            if variant.tile.dim() != block.dim() {
                return Err(shape_mismatch(block.dim(), variant.tile.dim()));
            }

            let colored = self.recoverer.recolor(&variant.tile, block)?;
            let score = structural_similarity(block.view(), colored.view(), &self.params)?;
            evaluated += 1;
            trace!("candidate {index} ({:?}) scored {score:.6}", variant.transform);

            // Strict comparison keeps the first candidate among equal scores
            if score > best_score {
                best_score = score;
                best = Some(MatchResult {
                    tile: colored,
                    score,
                    candidate_index: index,
                    evaluated,
                });
            }
            if best_score >= PERFECT_SCORE {
                break;
            }
        }

        best.map(|result| MatchResult {
            evaluated,
            ..result
        })
        .ok_or(TileArtError::NoCandidates { tileset_path: None })
    }
}

/// Find the best match for `block` with the default exhaustive search
///
/// # Errors
///
/// Returns an error if:
/// - The tileset is empty (`NoCandidates`)
/// - A candidate differs in shape from the block (`ShapeMismatch`)
/// - The block is smaller than the SSIM window (`InvalidParameter`)
pub fn find_best_match(block: &Tile, tileset: &Tileset) -> Result<MatchResult> {
    ExhaustiveSearch::new(tileset).search(block)
}
