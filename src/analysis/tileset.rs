//! Reference tileset slicing and variant expansion
//!
//! The tileset image is cut into a row-major grid of square tiles. Partial
//! tiles on the right and bottom edges are padded with black, and every grid
//! tile contributes its 8 symmetry variants to one flat, ordered candidate list.

use crate::io::configuration::TILE_SIZE;
use crate::io::error::Result;
use crate::io::image::load_rgb_image;
use crate::spatial::grid::{EdgePolicy, block_regions, extract_block, grid_shape};
use crate::spatial::tiles::Tile;
use crate::spatial::variants::{ALL_TRANSFORMS, Transform};
use image::RgbImage;
use log::info;
use std::path::Path;

/// A reference tile produced by transforming one tile of the tileset grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileVariant {
    /// Transformed tile pixels
    pub tile: Tile,
    /// Row-major index of the base tile in the tileset grid
    pub base_index: usize,
    /// Transform applied to the base tile
    pub transform: Transform,
}

/// Ordered candidate tiles for matching, built once per conversion run
#[derive(Debug, Clone)]
pub struct Tileset {
    variants: Vec<TileVariant>,
    tile_size: usize,
    grid_shape: (u32, u32),
    source_dimensions: (u32, u32),
}

impl Tileset {
    /// Slice a tileset image into `tile_size` tiles and expand each into its variants
    ///
    /// A zero-size image produces an empty tileset.
    pub fn build(img: &RgbImage, tile_size: usize) -> Self {
        let (width, height) = img.dimensions();
        let size = tile_size as u32;
        let regions = block_regions(width, height, size);

        let mut variants = Vec::with_capacity(regions.len() * ALL_TRANSFORMS.len());
        for (base_index, region) in regions.iter().enumerate() {
            let base = extract_block(img, region, tile_size, EdgePolicy::Black);
            variants.extend(ALL_TRANSFORMS.iter().map(|&transform| TileVariant {
                tile: transform.apply(&base),
                base_index,
                transform,
            }));
        }

        Self {
            variants,
            tile_size,
            grid_shape: grid_shape(width, height, size),
            source_dimensions: (width, height),
        }
    }

    /// Load a tileset image from disk and build the tileset
    ///
    /// # Errors
    ///
    /// Returns `ImageLoad` if the file is missing or cannot be decoded
    pub fn from_path<P: AsRef<Path>>(path: P, tile_size: usize) -> Result<Self> {
        let img = load_rgb_image(&path)?;
        let tileset = Self::build(&img, tile_size);
        info!(
            "Tileset '{}': {}x{} px, {} base tiles, {} candidates",
            path.as_ref().display(),
            tileset.source_dimensions.0,
            tileset.source_dimensions.1,
            tileset.base_tile_count(),
            tileset.len()
        );
        Ok(tileset)
    }

    /// All candidate variants in generation order
    pub fn variants(&self) -> &[TileVariant] {
        &self.variants
    }

    /// Iterate over candidate tiles in generation order
    pub fn iter(&self) -> impl Iterator<Item = &TileVariant> {
        self.variants.iter()
    }

    /// Candidate at `index`
    pub fn get(&self, index: usize) -> Option<&TileVariant> {
        self.variants.get(index)
    }

    /// Number of candidate variants
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the tileset holds no candidates
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Edge length of every tile
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Grid of base tiles as (columns, rows)
    pub const fn grid_shape(&self) -> (u32, u32) {
        self.grid_shape
    }

    /// Number of base tiles sliced from the tileset image
    pub const fn base_tile_count(&self) -> usize {
        self.grid_shape.0 as usize * self.grid_shape.1 as usize
    }

    /// Dimensions (width, height) of the tileset image
    pub const fn source_dimensions(&self) -> (u32, u32) {
        self.source_dimensions
    }
}

/// Build a tileset of default-size tiles from an image file
///
/// # Errors
///
/// Returns `ImageLoad` if the file is missing or cannot be decoded
pub fn build_tileset<P: AsRef<Path>>(path: P) -> Result<Tileset> {
    Tileset::from_path(path, TILE_SIZE)
}
