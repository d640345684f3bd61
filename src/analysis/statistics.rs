//! Statistical color recovery for the two classes of a reference tile
//!
//! A reference tile splits its positions into a black class and a white class.
//! The representative color of each class is the statistical mode of the
//! source block pixels found at those positions.

use crate::io::configuration::{BLACK, WHITE};
use crate::io::error::{Result, shape_mismatch};
use crate::spatial::tiles::{CHANNELS, Color, Tile};
use std::collections::BTreeMap;

/// How the mode of a set of colors is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeStrategy {
    /// Most frequent RGB triple; ties go to the lexicographically smallest triple
    #[default]
    Joint,
    /// Most frequent value of each channel independently; ties go to the smallest value
    ///
    /// The result may be a triple that never occurs in the samples.
    PerChannel,
}

/// Statistical mode of a set of colors
///
/// Returns `None` for an empty sample set.
pub fn color_mode<I>(samples: I, strategy: ModeStrategy) -> Option<Color>
where
    I: IntoIterator<Item = Color>,
{
    match strategy {
        ModeStrategy::Joint => joint_mode(samples),
        ModeStrategy::PerChannel => per_channel_mode(samples),
    }
}

fn joint_mode<I: IntoIterator<Item = Color>>(samples: I) -> Option<Color> {
    let mut counts: BTreeMap<Color, usize> = BTreeMap::new();
    for color in samples {
        *counts.entry(color).or_default() += 1;
    }

    // Ascending key order plus a strict comparison keeps the smallest tied color
    let mut best: Option<(Color, usize)> = None;
    for (color, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((color, count));
        }
    }
    best.map(|(color, _)| color)
}

fn per_channel_mode<I: IntoIterator<Item = Color>>(samples: I) -> Option<Color> {
    let mut histograms = [[0usize; 256]; CHANNELS];
    let mut seen = false;
    for color in samples {
        seen = true;
        for (histogram, value) in histograms.iter_mut().zip(color) {
            if let Some(count) = histogram.get_mut(usize::from(value)) {
                *count += 1;
            }
        }
    }
    if !seen {
        return None;
    }

    let mut mode = [0u8; CHANNELS];
    for (slot, histogram) in mode.iter_mut().zip(&histograms) {
        let mut best_count = 0;
        for (value, &count) in histogram.iter().enumerate() {
            if count > best_count {
                best_count = count;
                *slot = value as u8;
            }
        }
    }
    Some(mode)
}

/// Representative colors of the two classes of a reference tile
///
/// A class with no member positions has no representative color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorAssignment {
    /// Color for positions that are black in the reference tile
    pub black: Option<Color>,
    /// Color for positions that are white in the reference tile
    pub white: Option<Color>,
}

impl ColorAssignment {
    /// Compute the class colors of `candidate` by sampling `block` at co-located pixels
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the two tiles differ in shape
    pub fn compute(candidate: &Tile, block: &Tile, strategy: ModeStrategy) -> Result<Self> {
        if candidate.dim() != block.dim() {
            return Err(shape_mismatch(candidate.dim(), block.dim()));
        }

        let mut black_samples = Vec::new();
        let mut white_samples = Vec::new();
        for (class_color, sample) in candidate.pixels().zip(block.pixels()) {
            if class_color == BLACK {
                black_samples.push(sample);
            } else if class_color == WHITE {
                white_samples.push(sample);
            }
        }

        Ok(Self {
            black: color_mode(black_samples, strategy),
            white: color_mode(white_samples, strategy),
        })
    }
}
