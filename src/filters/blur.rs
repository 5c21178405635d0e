//! Gaussian smoothing applied before differentiation.
//!
//! Separable two-pass convolution with clamped (replicated) borders, so a
//! constant plane comes back unchanged, edges included.

use log::trace;
use serde::{Deserialize, Serialize};

use super::core::{convolve_separable_u8, gaussian_kernel_1d};
use crate::error::{PipelineError, Result};
use crate::image::IntensityMap;

/// Largest accepted kernel radius (129 taps).
pub const MAX_BLUR_RADIUS: usize = 64;

/// Gaussian blur settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurParams {
    /// Standard deviation. Values <= 0 derive sigma from `radius`.
    pub sigma: f32,
    /// Taps on each side of the center; 2 gives the canonical 5-tap kernel.
    pub radius: usize,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            sigma: 1.5,
            radius: 2,
        }
    }
}

impl BlurParams {
    pub fn validate(&self) -> Result<()> {
        if !self.sigma.is_finite() {
            return Err(PipelineError::Config(format!(
                "blur sigma must be finite, got {}",
                self.sigma
            )));
        }
        if self.radius > MAX_BLUR_RADIUS {
            return Err(PipelineError::Config(format!(
                "blur radius {} exceeds maximum {MAX_BLUR_RADIUS}",
                self.radius
            )));
        }
        Ok(())
    }
}

/// Apply Gaussian blur to an intensity map.
///
/// # Arguments
/// * `input` - Intensity map to smooth
/// * `params` - Kernel sigma and radius
///
/// # Returns
/// New map with the same dimensions
pub fn gaussian_blur(input: &IntensityMap, params: &BlurParams) -> Result<IntensityMap> {
    params.validate()?;
    if params.radius == 0 {
        // No blur, return copy
        return Ok(input.clone());
    }

    let kernel = gaussian_kernel_1d(params.sigma, params.radius)?;
    trace!(
        "gaussian blur {}x{} sigma={} taps={}",
        input.width(),
        input.height(),
        params.sigma,
        kernel.len()
    );

    let result = convolve_separable_u8(input.view(), &kernel)?;
    Ok(IntensityMap::from_array(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_map_unchanged() {
        for value in [0u8, 1, 128, 254, 255] {
            let img = IntensityMap::filled(7, 4, value).unwrap();
            let result = gaussian_blur(&img, &BlurParams::default()).unwrap();
            assert_eq!(result, img, "constant {value} should survive blur");
        }
    }

    #[test]
    fn test_five_by_five_all_128() {
        let img = IntensityMap::filled(5, 5, 128).unwrap();
        let result = gaussian_blur(&img, &BlurParams::default()).unwrap();
        assert!(result.as_slice().iter().all(|&v| v == 128));
    }

    #[test]
    fn test_zero_radius_copies() {
        let img = IntensityMap::from_vec(3, 1, vec![0, 255, 0]).unwrap();
        let params = BlurParams { sigma: 3.0, radius: 0 };
        assert_eq!(gaussian_blur(&img, &params).unwrap(), img);
    }

    #[test]
    fn test_spreads_impulse() {
        let mut data = vec![0u8; 25];
        data[12] = 255;
        let img = IntensityMap::from_vec(5, 5, data).unwrap();
        let result = gaussian_blur(&img, &BlurParams::default()).unwrap();

        assert!(result.get(2, 2) < 255);
        assert!(result.get(1, 2) > 0);
        assert_eq!(result.get(1, 2), result.get(3, 2));
        assert_eq!(result.get(2, 1), result.get(2, 3));
    }

    #[test]
    fn test_step_softened_near_boundary() {
        let data: Vec<u8> = (0..36).map(|i| if i % 6 < 3 { 0 } else { 255 }).collect();
        let img = IntensityMap::from_vec(6, 6, data).unwrap();
        let result = gaussian_blur(&img, &BlurParams::default()).unwrap();

        for y in 0..6 {
            assert!(result.get(2, y) > 0 && result.get(2, y) < 255);
            assert!(result.get(3, y) > 0 && result.get(3, y) < 255);
            // Replicated border keeps the far columns at their source values
            assert_eq!(result.get(0, y), 0);
            assert_eq!(result.get(5, y), 255);
        }
    }

    #[test]
    fn test_oversized_radius_rejected() {
        let img = IntensityMap::filled(4, 4, 10).unwrap();
        for radius in [MAX_BLUR_RADIUS + 1, usize::MAX / 2, usize::MAX] {
            let params = BlurParams { sigma: 1.5, radius };
            let err = gaussian_blur(&img, &params).unwrap_err();
            assert!(matches!(err, PipelineError::Config(_)), "radius {radius}");
        }
    }

    #[test]
    fn test_max_radius_accepted() {
        let img = IntensityMap::filled(3, 3, 42).unwrap();
        let params = BlurParams { sigma: 0.0, radius: MAX_BLUR_RADIUS };
        assert_eq!(gaussian_blur(&img, &params).unwrap(), img);
    }
}
