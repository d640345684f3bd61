//! Command-line interface for converting PNG/JPEG files into tile art

use crate::algorithm::executor::{Conversion, ConversionConfig};
use crate::analysis::statistics::ModeStrategy;
use crate::io::configuration::{OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS, TILE_SIZE};
use crate::io::error::{Result, TileArtError, invalid_parameter};
use crate::io::image::save_rgb_image;
use crate::io::progress::{BlockProgress, ProgressManager};
use crate::spatial::grid::EdgePolicy;
use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Edge handling for source blocks that extend past the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EdgeArg {
    /// Pad with black
    Black,
    /// Repeat the nearest edge pixel
    Replicate,
}

impl From<EdgeArg> for EdgePolicy {
    fn from(arg: EdgeArg) -> Self {
        match arg {
            EdgeArg::Black => Self::Black,
            EdgeArg::Replicate => Self::Replicate,
        }
    }
}

#[derive(Parser)]
#[command(name = "tilecast")]
#[command(
    author,
    version,
    about = "Rebuild images from a monochrome tileset using structural similarity"
)]
/// Command-line arguments for the tile-art converter
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image file or directory to convert
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Monochrome tileset image to build candidate tiles from
    #[arg(long, value_name = "PATH")]
    pub tileset: PathBuf,

    /// Edge length of tiles and blocks in pixels
    #[arg(short, long, default_value_t = TILE_SIZE)]
    pub tile_size: usize,

    /// Output file (single-file targets only)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Fill for partial blocks on the right and bottom edges
    #[arg(long, value_enum, default_value_t = EdgeArg::Black)]
    pub edge: EdgeArg,

    /// Take the color mode of each channel separately
    #[arg(long)]
    pub per_channel_mode: bool,

    /// Match blocks on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level selected by the verbosity flag
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Conversion settings for one source file
    pub fn conversion_config(&self, source_path: &Path) -> ConversionConfig {
        ConversionConfig {
            tile_size: self.tile_size,
            mode_strategy: if self.per_channel_mode {
                ModeStrategy::PerChannel
            } else {
                ModeStrategy::Joint
            },
            edge_policy: self.edge.into(),
            parallel: !self.sequential,
            ..ConversionConfig::new(source_path, &self.tileset)
        }
    }
}

/// Install a stderr terminal logger at the given level
///
/// Returns `false` when a logger was already installed; that logger stays active.
pub fn init_logging(level: LevelFilter) -> bool {
    match simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        Ok(()) => true,
        Err(error) => {
            debug!("Keeping existing logger: {error}");
            false
        }
    }
}

/// Orchestrates batch conversion of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// The tileset is built once and shared by every file.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, tileset loading or any conversion fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if self.cli.output.is_some() && self.cli.target.is_dir() {
            return Err(invalid_parameter(
                "output",
                &self.cli.target.display(),
                &"--output can only be used with a single input file",
            ));
        }

        let conversion = Conversion::prepare(self.cli.conversion_config(&self.cli.target))?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(&conversion, file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_supported_image(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a PNG or JPEG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let entries =
                std::fs::read_dir(&self.cli.target).map_err(|e| TileArtError::FileSystem {
                    path: self.cli.target.clone(),
                    operation: "read directory",
                    source: e,
                })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if is_supported_image(&path)
                    && !is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path_for(input_path);
        if output_path.exists() {
            warn!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(
        &mut self,
        conversion: &Conversion,
        input_path: &Path,
        index: usize,
    ) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path_for(input_path);

        let progress = match self.progress_manager {
            Some(ref mut pm) => {
                let blocks = image::image_dimensions(input_path)
                    .map(|(w, h)| conversion.converter().block_count(w, h))
                    .unwrap_or(0);
                pm.start_file(index, input_path, blocks)
            }
            None => BlockProgress::hidden(),
        };

        let outcome = conversion.run_path(input_path, &|| progress.tick())?;
        save_rgb_image(&outcome.image, &output_path)?;
        info!(
            "Wrote '{}' in {:.2}s",
            output_path.display(),
            start_time.elapsed().as_secs_f64()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }

    fn output_path_for(&self, input_path: &Path) -> PathBuf {
        match &self.cli.output {
            Some(path) if self.cli.target.is_file() => path.clone(),
            _ => get_output_path(input_path),
        }
    }
}

/// Default output location: `<stem>_tiled.<ext>` next to the input
pub fn get_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = input_path.extension().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        extension.to_string_lossy()
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Whether the file extension names a supported input format
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Whether the file looks like a previous conversion result
pub fn is_generated_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
