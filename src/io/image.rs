//! Image decoding and encoding at the filesystem boundary

use crate::io::error::{Result, TileArtError};
use image::RgbImage;
use std::path::Path;

/// Decode an image file into an RGB pixel grid, discarding any alpha channel
///
/// # Errors
///
/// Returns `ImageLoad` if the file does not exist or cannot be decoded
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| TileArtError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Save an RGB image, creating the parent directory if needed
///
/// The encoding is chosen from the file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn save_rgb_image<P: AsRef<Path>>(img: &RgbImage, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| TileArtError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path)
        .map_err(|e| TileArtError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
