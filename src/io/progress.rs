//! Multi-file block progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Coordinates progress display for batch conversions
///
/// Each file gets a bar counting matched blocks. Bars are recycled in a
/// rolling window so at most `MAX_INDIVIDUAL_PROGRESS_BARS` are on screen, and
/// large batches additionally get a single files-processed bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} blocks {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Thread-safe handle advancing one file's block counter
#[derive(Clone)]
pub struct BlockProgress {
    bar: Option<ProgressBar>,
}

impl BlockProgress {
    /// A handle that reports nowhere
    pub const fn hidden() -> Self {
        Self { bar: None }
    }

    /// Record one matched block
    pub fn tick(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Blocks recorded so far
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_count: 0,
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        // Switch to batch mode for large file sets to avoid terminal spam
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of files announced in `initialize`
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Configure the bar for a new file and return its block counter
    pub fn start_file(&mut self, index: usize, path: &Path, blocks: usize) -> BlockProgress {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let bar = self.slot(index).cloned();
        if let Some(bar) = &bar {
            bar.reset();
            bar.set_length(blocks as u64);
            bar.set_position(0);
            bar.set_prefix(display_name);
            bar.set_message(String::new());
        }
        BlockProgress { bar }
    }

    /// Mark file as completed and update batch progress
    pub fn complete_file(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(bar) = self.slot(index) {
            let name = bar.prefix();
            bar.set_prefix(format!("✓ {name}"));
            bar.set_message(format!("in {:.1}s", elapsed.as_secs_f64()));
            if let Some(length) = bar.length() {
                bar.set_position(length);
            }
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    // Files rotate through the available bars so the most recent stay visible
    fn slot(&self, index: usize) -> Option<&ProgressBar> {
        if self.file_bars.is_empty() {
            return None;
        }
        self.file_bars.get(index % self.file_bars.len())
    }
}
