//! Error types and context management for conversion operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all conversion operations
#[derive(Debug)]
pub enum TileArtError {
    /// Failed to load or decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the converted image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Two rasters that must be compared pixel-for-pixel differ in shape
    ///
    /// Shapes are reported as (rows, cols).
    ShapeMismatch {
        /// Shape required by the operation
        expected: (usize, usize),
        /// Shape that was actually supplied
        found: (usize, usize),
        /// Origin (x, y) of the source block being processed, when known
        block: Option<[u32; 2]>,
    },

    /// Conversion parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Matching was requested against a tileset without any tiles
    NoCandidates {
        /// Tileset image the empty tileset was built from, when known
        tileset_path: Option<PathBuf>,
    },
}

impl fmt::Display for TileArtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::ShapeMismatch {
                expected,
                found,
                block,
            } => {
                write!(
                    f,
                    "Shape mismatch: expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )?;
                if let Some([x, y]) = block {
                    write!(f, " (block at {x}, {y})")?;
                }
                Ok(())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::NoCandidates { tileset_path } => match tileset_path {
                Some(path) => write!(
                    f,
                    "Tileset '{}' contains no tiles to match against",
                    path.display()
                ),
                None => write!(f, "Tileset contains no tiles to match against"),
            },
        }
    }
}

impl std::error::Error for TileArtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for conversion results
pub type Result<T> = std::result::Result<T, TileArtError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Origin (x, y) of the block being processed
    pub block: Option<[u32; 2]>,
    /// Tileset image in use
    pub tileset_path: Option<PathBuf>,
}

/// Enriches error messages with conversion state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the block origin
    ///
    /// # Errors
    ///
    /// Propagates the original error with the block origin applied
    fn with_block(self, origin: [u32; 2]) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<TileArtError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only certain error types benefit from positional context
            match &mut error {
                TileArtError::ShapeMismatch { block, .. } => {
                    if context.block.is_some() {
                        *block = context.block;
                    }
                }
                TileArtError::NoCandidates { tileset_path } => {
                    if context.tileset_path.is_some() {
                        tileset_path.clone_from(&context.tileset_path);
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_block(self, origin: [u32; 2]) -> Result<T> {
        self.with_context(ErrorContext {
            block: Some(origin),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for TileArtError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for TileArtError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TileArtError {
    TileArtError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a shape mismatch error from two (rows, cols) shapes
pub const fn shape_mismatch(expected: (usize, usize), found: (usize, usize)) -> TileArtError {
    TileArtError::ShapeMismatch {
        expected,
        found,
        block: None,
    }
}
