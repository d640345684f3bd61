//! Structural similarity index (SSIM) for multi-channel 8-bit rasters
//!
//! Local statistics are taken over a uniform square window with sample
//! covariance normalisation. The SSIM map is only evaluated where the window
//! fits entirely inside the raster, and the final score is the mean over that
//! map, averaged across channels.

use crate::io::configuration::{SSIM_DATA_RANGE, SSIM_K1, SSIM_K2, SSIM_WINDOW};
use crate::io::error::{Result, invalid_parameter, shape_mismatch};
use ndarray::{ArrayView2, ArrayView3, Axis};

/// Parameters of the structural similarity computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SsimParams {
    /// Side of the square comparison window (odd, at least 3)
    pub window: usize,
    /// Luminance stabilisation constant
    pub k1: f64,
    /// Contrast stabilisation constant
    pub k2: f64,
    /// Dynamic range of channel values
    pub data_range: f64,
}

impl Default for SsimParams {
    fn default() -> Self {
        Self {
            window: SSIM_WINDOW,
            k1: SSIM_K1,
            k2: SSIM_K2,
            data_range: SSIM_DATA_RANGE,
        }
    }
}

impl SsimParams {
    /// Check the window against a raster of `rows`×`cols` pixels
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the window is even, smaller than 3,
    /// or larger than either dimension
    pub fn validate(&self, rows: usize, cols: usize) -> Result<()> {
        if self.window < 3 || self.window % 2 == 0 {
            return Err(invalid_parameter(
                "window",
                &self.window,
                &"SSIM window must be odd and at least 3",
            ));
        }
        if self.window > rows || self.window > cols {
            return Err(invalid_parameter(
                "window",
                &self.window,
                &format!("SSIM window exceeds raster size {rows}x{cols}"),
            ));
        }
        Ok(())
    }
}

/// Mean structural similarity between two `(rows, cols, channels)` rasters
///
/// Identical inputs score exactly 1.0; the score always lies in [-1, 1].
///
/// # Errors
///
/// Returns an error if:
/// - The rasters differ in shape (`ShapeMismatch`)
/// - The window is invalid for the raster size (`InvalidParameter`)
pub fn structural_similarity(
    a: ArrayView3<'_, u8>,
    b: ArrayView3<'_, u8>,
    params: &SsimParams,
) -> Result<f64> {
    let (rows, cols, channels) = a.dim();
    let (b_rows, b_cols, b_channels) = b.dim();
    if (rows, cols) != (b_rows, b_cols) || channels != b_channels {
        return Err(shape_mismatch((rows, cols), (b_rows, b_cols)));
    }
    params.validate(rows, cols)?;
    if channels == 0 {
        return Err(invalid_parameter(
            "channels",
            &channels,
            &"rasters must have at least one channel",
        ));
    }

    let total: f64 = (0..channels)
        .map(|ch| channel_ssim(a.index_axis(Axis(2), ch), b.index_axis(Axis(2), ch), params))
        .sum();
    Ok(total / channels as f64)
}

// Mean of the SSIM map for one channel over all fully-contained windows
fn channel_ssim(a: ArrayView2<'_, u8>, b: ArrayView2<'_, u8>, params: &SsimParams) -> f64 {
    let win = params.window;
    let np = (win * win) as f64;
    let cov_norm = np / (np - 1.0);
    let c1 = (params.k1 * params.data_range).powi(2);
    let c2 = (params.k2 * params.data_range).powi(2);

    let mut sum = 0.0;
    let mut count = 0usize;
    for (wa, wb) in a.windows((win, win)).into_iter().zip(b.windows((win, win))) {
        let mut sx = 0.0;
        let mut sy = 0.0;
        let mut sxx = 0.0;
        let mut syy = 0.0;
        let mut sxy = 0.0;
        for (&x, &y) in wa.iter().zip(wb.iter()) {
            let (x, y) = (f64::from(x), f64::from(y));
            sx += x;
            sy += y;
            sxx += x * x;
            syy += y * y;
            sxy += x * y;
        }

        let ux = sx / np;
        let uy = sy / np;
        let vx = cov_norm * (sxx / np - ux * ux);
        let vy = cov_norm * (syy / np - uy * uy);
        let vxy = cov_norm * (sxy / np - ux * uy);

        let numerator = (2.0 * ux * uy + c1) * (2.0 * vxy + c2);
        let denominator = (ux * ux + uy * uy + c1) * (vx + vy + c2);
        sum += numerator / denominator;
        count += 1;
    }

    sum / count as f64
}
