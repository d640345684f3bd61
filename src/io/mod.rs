//! Input/output operations, configuration and error handling

/// Command-line parsing and batch file processing
pub mod cli;
/// Conversion constants and defaults
pub mod configuration;
/// Error types and context propagation
pub mod error;
/// Image decoding and encoding
pub mod image;
/// Progress bars for batch conversion
pub mod progress;
