//! Block grid partitioning with clipping at image edges
//!
//! Images are walked in row-major blocks starting at (0, 0). Blocks on the
//! right and bottom edges may extend past the image; their regions are clipped
//! to the pixels that exist, and extraction fills the remainder according to
//! an `EdgePolicy` so that every extracted tile is square.

use crate::io::configuration::BLACK;
use crate::spatial::tiles::Tile;
use image::{Rgb, RgbImage};

/// How pixels outside the image are filled when a block is cropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Fill with black, as a crop past the image edge does
    #[default]
    Black,
    /// Clamp to the nearest pixel inside the image
    Replicate,
}

/// Area of an image covered by one block, clipped to the image bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRegion {
    /// Left edge in image pixels
    pub x: u32,
    /// Top edge in image pixels
    pub y: u32,
    /// Width of the visible part of the block
    pub width: u32,
    /// Height of the visible part of the block
    pub height: u32,
}

impl BlockRegion {
    /// Block origin as (x, y)
    pub const fn origin(&self) -> [u32; 2] {
        [self.x, self.y]
    }

    /// Whether the block lies entirely inside the image
    pub const fn is_full(&self, size: u32) -> bool {
        self.width == size && self.height == size
    }
}

/// Partition an image into row-major block regions of edge length `size`
///
/// Returns an empty list when either dimension or `size` is zero.
pub fn block_regions(width: u32, height: u32, size: u32) -> Vec<BlockRegion> {
    if size == 0 {
        return Vec::new();
    }

    let step = size as usize;
    let mut regions = Vec::new();
    for y in (0..height).step_by(step) {
        for x in (0..width).step_by(step) {
            regions.push(BlockRegion {
                x,
                y,
                width: size.min(width - x),
                height: size.min(height - y),
            });
        }
    }
    regions
}

/// Number of block columns and rows covering an image
pub const fn grid_shape(width: u32, height: u32, size: u32) -> (u32, u32) {
    if size == 0 {
        return (0, 0);
    }
    (width.div_ceil(size), height.div_ceil(size))
}

/// Crop a `size`×`size` tile starting at the region origin
///
/// Pixels past the image edge are filled according to `policy`.
pub fn extract_block(
    img: &RgbImage,
    region: &BlockRegion,
    size: usize,
    policy: EdgePolicy,
) -> Tile {
    let (width, height) = img.dimensions();
    Tile::from_fn(size, size, |r, c| {
        let x = region.x as usize + c;
        let y = region.y as usize + r;
        let inside = x < width as usize && y < height as usize;
        match (inside, policy) {
            (true, _) => img.get_pixel_checked(x as u32, y as u32).map_or(BLACK, |p| p.0),
            (false, EdgePolicy::Black) => BLACK,
            (false, EdgePolicy::Replicate) => {
                let cx = x.min((width as usize).saturating_sub(1)) as u32;
                let cy = y.min((height as usize).saturating_sub(1)) as u32;
                img.get_pixel_checked(cx, cy).map_or(BLACK, |p| p.0)
            }
        }
    })
}

/// Paste the visible part of a tile into `output` at the region origin
///
/// Only the region's clipped area is written, so a padded boundary tile never
/// grows the output image.
pub fn paste_block(output: &mut RgbImage, tile: &Tile, region: &BlockRegion) {
    for r in 0..region.height {
        for c in 0..region.width {
            if let Some(color) = tile.pixel(r as usize, c as usize) {
                if let Some(px) = output.get_pixel_mut_checked(region.x + c, region.y + r) {
                    *px = Rgb(color);
                }
            }
        }
    }
}
