//! Conversion constants and runtime configuration defaults

// Tile geometry
/// Edge length of tileset tiles and source blocks
pub const TILE_SIZE: usize = 8;

// Structural similarity parameters (scikit-image defaults for 8-bit input)
/// Side of the square SSIM comparison window (must be odd)
pub const SSIM_WINDOW: usize = 7;
/// Luminance stabilisation constant
pub const SSIM_K1: f64 = 0.01;
/// Contrast stabilisation constant
pub const SSIM_K2: f64 = 0.03;
/// Dynamic range of 8-bit channel values
pub const SSIM_DATA_RANGE: f64 = 255.0;

/// Score of a candidate identical to its source block; ends the search early
pub const PERFECT_SCORE: f64 = 1.0;

// Reference tile classes
/// Canonical black pixel of a reference tile
pub const BLACK: [u8; 3] = [0, 0, 0];
/// Canonical white pixel of a reference tile
pub const WHITE: [u8; 3] = [255, 255, 255];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_tiled";
/// Input file extensions accepted in directory mode
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
