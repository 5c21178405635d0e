//! Core utilities shared by the filters.
//!
//! - Gaussian kernel generation
//! - Separable convolution with replicated borders
//! - Fallible plane allocation

use ndarray::{Array2, ArrayView2};

use crate::error::{alloc_zeroed, PipelineError, Result};

/// Sigma implied by a kernel size when none is given.
///
/// Same rule OpenCV applies for `sigma <= 0`:
/// `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`, with `ksize = 2 * radius + 1`.
pub fn sigma_for_radius(radius: usize) -> f32 {
    0.3 * (radius as f32 - 1.0) + 0.8
}

/// Generate a normalized 1D Gaussian kernel with `2 * radius + 1` taps.
///
/// # Arguments
/// * `sigma` - Standard deviation; non-positive values fall back to [`sigma_for_radius`]
/// * `radius` - Taps on each side of the center
///
/// # Errors
/// `Allocation` when the tap count overflows or cannot be reserved.
pub fn gaussian_kernel_1d(sigma: f32, radius: usize) -> Result<Vec<f32>> {
    if radius == 0 {
        return Ok(vec![1.0]);
    }
    let sigma = if sigma > 0.0 { sigma } else { sigma_for_radius(radius) };

    let taps = radius
        .checked_mul(2)
        .and_then(|n| n.checked_add(1))
        .ok_or(PipelineError::Allocation { bytes: usize::MAX })?;
    let mut kernel: Vec<f32> = alloc_zeroed(taps)?;
    for (i, v) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *v = (-x * x / (2.0 * sigma * sigma)).exp();
    }

    // Normalize
    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    Ok(kernel)
}

/// Allocate a zeroed (height, width) plane without aborting on failure.
pub fn zeros_2d<T: Copy + Default>(height: usize, width: usize) -> Result<Array2<T>> {
    let buf = alloc_zeroed(height.saturating_mul(width))?;
    Ok(Array2::from_shape_vec((height, width), buf)?)
}

/// Convolve a plane with `kernel` along x then y.
///
/// Out-of-range taps read the nearest edge sample. Results are rounded to the
/// nearest integer and clamped to 0-255.
pub fn convolve_separable_u8(input: ArrayView2<u8>, kernel: &[f32]) -> Result<Array2<u8>> {
    let (height, width) = input.dim();
    let half = kernel.len() / 2;

    let mut temp = zeros_2d::<f32>(height, width)?;
    let mut result = zeros_2d::<u8>(height, width)?;

    // Horizontal pass
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = (x as isize + ki as isize - half as isize)
                    .clamp(0, width as isize - 1) as usize;
                sum += input[[y, sx]] as f32 * kv;
            }
            temp[[y, x]] = sum;
        }
    }

    // Vertical pass
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = (y as isize + ki as isize - half as isize)
                    .clamp(0, height as isize - 1) as usize;
                sum += temp[[sy, x]] * kv;
            }
            result[[y, x]] = sum.round().clamp(0.0, 255.0) as u8;
        }
    }

    Ok(result)
}
