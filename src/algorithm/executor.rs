//! Whole-image conversion: block walk, per-block search and output assembly

use crate::algorithm::matcher::{ExhaustiveSearch, SearchStrategy};
use crate::algorithm::recolor::ColorRecoverer;
use crate::analysis::statistics::ModeStrategy;
use crate::analysis::tileset::Tileset;
use crate::io::configuration::{SSIM_WINDOW, TILE_SIZE};
use crate::io::error::{ErrorContext, Result, WithContext, invalid_parameter};
use crate::io::image::load_rgb_image;
use crate::spatial::grid::{BlockRegion, EdgePolicy, block_regions, extract_block, paste_block};
use crate::spatial::tiles::Tile;
use image::RgbImage;
use log::{debug, info};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::path::PathBuf;

/// Parameters of a single image conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Image to convert
    pub source_path: PathBuf,
    /// Monochrome reference tileset image
    pub tileset_path: PathBuf,
    /// Edge length of tiles and blocks
    pub tile_size: usize,
    /// Mode computation used when recoloring candidates
    pub mode_strategy: ModeStrategy,
    /// Fill for boundary blocks that extend past the source image
    pub edge_policy: EdgePolicy,
    /// Whether blocks are matched on the rayon thread pool
    pub parallel: bool,
}

impl ConversionConfig {
    /// Configuration with default parameters for the given image pair
    pub fn new(source_path: impl Into<PathBuf>, tileset_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            tileset_path: tileset_path.into(),
            tile_size: TILE_SIZE,
            mode_strategy: ModeStrategy::default(),
            edge_policy: EdgePolicy::default(),
            parallel: true,
        }
    }
}

/// Match outcome recorded for one block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockScore {
    /// Block origin (x, y) in the source image
    pub origin: [u32; 2],
    /// Similarity of the chosen tile
    pub score: f64,
    /// Tileset index of the chosen candidate
    pub candidate_index: usize,
}

/// Result of converting one image
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// Assembled tile-art image, same dimensions as the source
    pub image: RgbImage,
    /// Per-block results in row-major block order
    pub block_scores: Vec<BlockScore>,
}

impl ConversionOutcome {
    /// Mean similarity over all blocks, or `None` for an image without blocks
    pub fn mean_score(&self) -> Option<f64> {
        if self.block_scores.is_empty() {
            return None;
        }
        let total: f64 = self.block_scores.iter().map(|b| b.score).sum();
        Some(total / self.block_scores.len() as f64)
    }
}

/// Converts images block by block with a pluggable search strategy
#[derive(Debug, Clone, Copy)]
pub struct Converter {
    tile_size: usize,
    edge_policy: EdgePolicy,
    parallel: bool,
}

impl Converter {
    /// Create a converter, validating the block geometry
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `tile_size` is smaller than the SSIM window
    pub fn new(tile_size: usize, edge_policy: EdgePolicy, parallel: bool) -> Result<Self> {
        if tile_size < SSIM_WINDOW {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &format!("must be at least the SSIM window size {SSIM_WINDOW}"),
            ));
        }
        if u32::try_from(tile_size).is_err() {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &"does not fit image coordinates",
            ));
        }
        Ok(Self {
            tile_size,
            edge_policy,
            parallel,
        })
    }

    /// Create a converter from the geometry fields of a configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the tile size is invalid
    pub fn from_config(config: &ConversionConfig) -> Result<Self> {
        Self::new(config.tile_size, config.edge_policy, config.parallel)
    }

    /// Edge length of blocks
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of blocks an image of the given dimensions is split into
    pub fn block_count(&self, width: u32, height: u32) -> usize {
        block_regions(width, height, self.tile_size as u32).len()
    }

    /// Convert `source` by replacing every block with the strategy's best match
    ///
    /// `progress` is called once per finished block, possibly from worker threads.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the search; no partial image is produced
    pub fn convert_image(
        &self,
        source: &RgbImage,
        strategy: &dyn SearchStrategy,
        progress: &(dyn Fn() + Sync),
    ) -> Result<ConversionOutcome> {
        let (width, height) = source.dimensions();
        let regions = block_regions(width, height, self.tile_size as u32);

        let match_region = |region: &BlockRegion| -> Result<(BlockRegion, Tile, BlockScore)> {
            let block = extract_block(source, region, self.tile_size, self.edge_policy);
            let result = strategy.search(&block).with_block(region.origin())?;
            debug!(
                "Block at ({}, {}): candidate {} scored {:.6} after {} evaluations",
                region.x, region.y, result.candidate_index, result.score, result.evaluated
            );
            progress();
            let score = BlockScore {
                origin: region.origin(),
                score: result.score,
                candidate_index: result.candidate_index,
            };
            Ok((*region, result.tile, score))
        };

        // Collecting into Result keeps row-major order and stops at the first error
        let matches: Vec<(BlockRegion, Tile, BlockScore)> = if self.parallel {
            regions.par_iter().map(match_region).collect::<Result<_>>()?
        } else {
            regions.iter().map(match_region).collect::<Result<_>>()?
        };

        let mut image = RgbImage::new(width, height);
        let mut block_scores = Vec::with_capacity(matches.len());
        for (region, tile, score) in matches {
            paste_block(&mut image, &tile, &region);
            block_scores.push(score);
        }

        Ok(ConversionOutcome {
            image,
            block_scores,
        })
    }
}

/// Prepared conversion: a validated converter plus the tileset it matches against
#[derive(Debug, Clone)]
pub struct Conversion {
    config: ConversionConfig,
    converter: Converter,
    tileset: Tileset,
}

impl Conversion {
    /// Validate the configuration and build the tileset
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile size is invalid
    /// - The tileset image cannot be loaded
    pub fn prepare(config: ConversionConfig) -> Result<Self> {
        let converter = Converter::from_config(&config)?;
        let tileset = Tileset::from_path(&config.tileset_path, config.tile_size)?;
        Ok(Self {
            config,
            converter,
            tileset,
        })
    }

    /// Tileset shared by every conversion run through this value
    pub const fn tileset(&self) -> &Tileset {
        &self.tileset
    }

    /// Block converter in use
    pub const fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Convert one decoded image
    ///
    /// # Errors
    ///
    /// Returns an error if the tileset is empty or a block cannot be matched
    pub fn run_image(
        &self,
        source: &RgbImage,
        progress: &(dyn Fn() + Sync),
    ) -> Result<ConversionOutcome> {
        let strategy = ExhaustiveSearch::new(&self.tileset)
            .with_recoverer(ColorRecoverer::new(self.config.mode_strategy));
        self.converter
            .convert_image(source, &strategy, progress)
            .with_context(ErrorContext {
                tileset_path: Some(self.config.tileset_path.clone()),
                ..Default::default()
            })
    }

    /// Load the configured source image and convert it
    ///
    /// # Errors
    ///
    /// Returns an error if the source image cannot be loaded or converted
    pub fn run(&self, progress: &(dyn Fn() + Sync)) -> Result<ConversionOutcome> {
        self.run_path(&self.config.source_path, progress)
    }

    /// Load an arbitrary source image and convert it with this tileset
    ///
    /// # Errors
    ///
    /// Returns an error if the source image cannot be loaded or converted
    pub fn run_path(
        &self,
        source_path: &std::path::Path,
        progress: &(dyn Fn() + Sync),
    ) -> Result<ConversionOutcome> {
        let source = load_rgb_image(source_path)?;
        info!(
            "Converting '{}' ({}x{} px, {} blocks)",
            source_path.display(),
            source.width(),
            source.height(),
            self.converter.block_count(source.width(), source.height())
        );
        let outcome = self.run_image(&source, progress)?;
        if let Some(mean) = outcome.mean_score() {
            info!("Mean block similarity {mean:.4}");
        }
        Ok(outcome)
    }
}

/// Convert the configured source image against the configured tileset
///
/// # Errors
///
/// Returns an error if:
/// - Either image cannot be loaded or decoded
/// - The tile size is invalid
/// - The tileset contains no tiles while the source has at least one block
pub fn convert(config: ConversionConfig) -> Result<ConversionOutcome> {
    Conversion::prepare(config)?.run(&|| {})
}
