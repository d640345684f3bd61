//! Square RGB rasters used for both tileset tiles and source blocks
//!
//! Pixels live in an `(rows, cols, 3)` array so that per-pixel colors are
//! contiguous lanes along the last axis. Geometric transforms are expressed
//! as axis permutations and reversals of views, then materialised once.

use crate::io::configuration::{BLACK, WHITE};
use crate::io::error::{Result, invalid_parameter};
use image::{Rgb, RgbImage};
use ndarray::{Array3, ArrayView3, Axis};

/// An RGB triple with 8-bit channels
pub type Color = [u8; 3];

/// Number of color channels per pixel
pub const CHANNELS: usize = 3;

/// Raster of RGB pixels addressed by (row, col)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pixels: Array3<u8>,
}

impl Tile {
    /// Wrap an `(rows, cols, 3)` array
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the last axis does not hold exactly 3 channels
    pub fn from_array(pixels: Array3<u8>) -> Result<Self> {
        let channels = pixels.dim().2;
        if channels != CHANNELS {
            return Err(invalid_parameter(
                "pixels",
                &channels,
                &"tiles must have exactly 3 color channels",
            ));
        }
        Ok(Self { pixels })
    }

    /// Create a tile where every pixel has the same color
    pub fn filled(rows: usize, cols: usize, color: Color) -> Self {
        Self::from_fn(rows, cols, |_, _| color)
    }

    /// Create a tile by evaluating `f(row, col)` for every pixel
    pub fn from_fn(rows: usize, cols: usize, f: impl Fn(usize, usize) -> Color) -> Self {
        let pixels = Array3::from_shape_fn((rows, cols, CHANNELS), |(r, c, ch)| {
            f(r, c).get(ch).copied().unwrap_or(0)
        });
        Self { pixels }
    }

    /// Copy a tile out of an image whose dimensions exactly match
    pub fn from_image(img: &RgbImage) -> Self {
        Self::from_fn(img.height() as usize, img.width() as usize, |r, c| {
            img.get_pixel_checked(c as u32, r as u32)
                .map_or(BLACK, |p| p.0)
        })
    }

    /// Render the tile as an image of the same dimensions
    pub fn to_image(&self) -> RgbImage {
        let (rows, cols) = self.dim();
        RgbImage::from_fn(cols as u32, rows as u32, |x, y| {
            Rgb(self.pixel(y as usize, x as usize).unwrap_or(BLACK))
        })
    }

    /// Shape as (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        let (rows, cols, _) = self.pixels.dim();
        (rows, cols)
    }

    /// Color at (row, col), or `None` outside the tile
    pub fn pixel(&self, row: usize, col: usize) -> Option<Color> {
        Some([
            *self.pixels.get((row, col, 0))?,
            *self.pixels.get((row, col, 1))?,
            *self.pixels.get((row, col, 2))?,
        ])
    }

    /// Overwrite the color at (row, col); positions outside the tile are ignored
    pub fn set_pixel(&mut self, row: usize, col: usize, color: Color) {
        for (ch, value) in color.into_iter().enumerate() {
            if let Some(slot) = self.pixels.get_mut((row, col, ch)) {
                *slot = value;
            }
        }
    }

    /// Iterate over all pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
        self.pixels
            .lanes(Axis(2))
            .into_iter()
            .map(|lane| {
                let mut color = BLACK;
                for (slot, &value) in color.iter_mut().zip(lane.iter()) {
                    *slot = value;
                }
                color
            })
    }

    /// Borrow the underlying `(rows, cols, 3)` array
    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    /// Rotate a quarter turn counter-clockwise about the tile center
    ///
    /// Transposing then reversing the row axis maps `new[i][j] = old[j][n-1-i]`.
    pub fn rotate_90(&self) -> Self {
        let mut view = self.pixels.view();
        view.swap_axes(0, 1);
        view.invert_axis(Axis(0));
        Self {
            pixels: view.as_standard_layout().into_owned(),
        }
    }

    /// Rotate by `quarter_turns` counter-clockwise quarter turns
    pub fn rotated(&self, quarter_turns: usize) -> Self {
        (0..quarter_turns % 4).fold(self.clone(), |tile, _| tile.rotate_90())
    }

    /// Invert every channel (`v -> 255 - v`)
    pub fn inverted(&self) -> Self {
        Self {
            pixels: self.pixels.mapv(|v| u8::MAX - v),
        }
    }

    /// Whether every pixel is canonical black or canonical white
    pub fn is_binary(&self) -> bool {
        self.pixels().all(|p| p == BLACK || p == WHITE)
    }
}
