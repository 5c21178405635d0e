//! Edge detection: Sobel magnitude and Canny-style hysteresis.
//!
//! Gradients use the standard Sobel pair applied by correlation:
//!
//! ```text
//! Gx = [[-1, 0, 1],      Gy = [[-1, -2, -1],
//!       [-2, 0, 2],            [ 0,  0,  0],
//!       [-1, 0, 1]]            [ 1,  2,  1]]
//! ```
//!
//! `Gx(x, y) = Σ K[j][i] * I(x + i - 1, y + j - 1)`, so a dark-to-bright
//! transition left to right yields positive `Gx`.
//!
//! ## Border Policy
//!
//! The one-pixel frame where the 3x3 window would leave the buffer is not
//! computed: gradients and magnitude are 0 there, and it never carries an edge
//! in either mode. Planes narrower or shorter than 3 pixels are all border.

use std::collections::VecDeque;

use log::trace;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::core::zeros_2d;
use crate::error::{PipelineError, Result};
use crate::image::{EdgeMap, IntensityMap, ValueSemantics};

pub const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
pub const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

// ============================================================================
// Sobel Gradients
// ============================================================================

/// Per-pixel Sobel responses for one plane.
#[derive(Debug, Clone)]
pub struct Gradients {
    pub gx: Array2<i32>,
    pub gy: Array2<i32>,
    /// Unclamped `sqrt(gx² + gy²)`.
    pub magnitude: Array2<f32>,
}

impl Gradients {
    pub fn width(&self) -> usize {
        self.magnitude.ncols()
    }

    pub fn height(&self) -> usize {
        self.magnitude.nrows()
    }

    /// Gradient direction at (x, y) in radians, range (-π, π].
    pub fn direction(&self, x: usize, y: usize) -> f32 {
        (self.gy[[y, x]] as f32).atan2(self.gx[[y, x]] as f32)
    }

    fn check_shapes(&self) -> Result<()> {
        let expected = self.magnitude.len();
        for actual in [self.gx.len(), self.gy.len()] {
            if actual != expected {
                return Err(PipelineError::Dimension { expected, actual });
            }
        }
        let expected = self.magnitude.dim();
        for actual in [self.gx.dim(), self.gy.dim()] {
            if actual != expected {
                return Err(PipelineError::Shape { expected, actual });
            }
        }
        Ok(())
    }
}

/// Compute Sobel gradients for every interior pixel.
pub fn sobel_gradients(input: &IntensityMap) -> Result<Gradients> {
    let (width, height) = (input.width(), input.height());
    let src = input.view();

    let mut gx_out = zeros_2d::<i32>(height, width)?;
    let mut gy_out = zeros_2d::<i32>(height, width)?;
    let mut magnitude = zeros_2d::<f32>(height, width)?;

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut gx = 0i32;
            let mut gy = 0i32;

            for ky in 0..3 {
                for kx in 0..3 {
                    let v = src[[y + ky - 1, x + kx - 1]] as i32;
                    gx += v * SOBEL_X[ky][kx];
                    gy += v * SOBEL_Y[ky][kx];
                }
            }

            gx_out[[y, x]] = gx;
            gy_out[[y, x]] = gy;
            magnitude[[y, x]] = ((gx * gx + gy * gy) as f32).sqrt();
        }
    }

    Ok(Gradients {
        gx: gx_out,
        gy: gy_out,
        magnitude,
    })
}

/// Sobel magnitude edge map.
///
/// Each interior sample is `round(sqrt(Gx² + Gy²))` clamped to 255; the
/// border is 0.
pub fn sobel_magnitude(input: &IntensityMap) -> Result<EdgeMap> {
    let grad = sobel_gradients(input)?;
    trace!("sobel magnitude {}x{}", grad.width(), grad.height());

    let mut output = zeros_2d::<u8>(grad.height(), grad.width())?;
    for ((y, x), &mag) in grad.magnitude.indexed_iter() {
        output[[y, x]] = mag.round().min(255.0) as u8;
    }

    Ok(EdgeMap::from_array(output, ValueSemantics::Magnitude))
}

// ============================================================================
// Non-Maximum Suppression
// ============================================================================

/// Neighbor offsets (behind, ahead) along the quantized gradient direction.
fn direction_neighbors(gx: i32, gy: i32) -> ((isize, isize), (isize, isize)) {
    let mut angle = (gy as f32).atan2(gx as f32).to_degrees();
    if angle < 0.0 {
        angle += 180.0;
    }

    if !(22.5..157.5).contains(&angle) {
        // 0°: horizontal gradient, compare left / right
        ((-1, 0), (1, 0))
    } else if angle < 67.5 {
        // 45°: y grows downward, so this axis runs top-left to bottom-right
        ((-1, -1), (1, 1))
    } else if angle < 112.5 {
        // 90°
        ((0, -1), (0, 1))
    } else {
        // 135°
        ((1, -1), (-1, 1))
    }
}

/// Thin gradient ridges to one pixel.
///
/// A pixel keeps its magnitude when it is strictly greater than the neighbor
/// behind it and at least equal to the neighbor ahead along the quantized
/// gradient direction; otherwise it becomes 0. The asymmetric comparison keeps
/// exactly one pixel of a two-pixel plateau. Border pixels are always 0.
pub fn non_max_suppression(grad: &Gradients) -> Result<Array2<f32>> {
    grad.check_shapes()?;
    let (width, height) = (grad.width(), grad.height());
    let mut output = zeros_2d::<f32>(height, width)?;

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mag = grad.magnitude[[y, x]];
            if mag <= 0.0 {
                continue;
            }

            let ((bx, by), (ax, ay)) = direction_neighbors(grad.gx[[y, x]], grad.gy[[y, x]]);
            let behind = grad.magnitude[[(y as isize + by) as usize, (x as isize + bx) as usize]];
            let ahead = grad.magnitude[[(y as isize + ay) as usize, (x as isize + ax) as usize]];

            if mag > behind && mag >= ahead {
                output[[y, x]] = mag;
            }
        }
    }

    Ok(output)
}

// ============================================================================
// Hysteresis Thresholding
// ============================================================================

/// Two-threshold edge classification, in unclamped Sobel magnitude units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HysteresisParams {
    pub low: f32,
    pub high: f32,
}

impl Default for HysteresisParams {
    fn default() -> Self {
        Self {
            low: 50.0,
            high: 150.0,
        }
    }
}

impl HysteresisParams {
    pub fn validate(&self) -> Result<()> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low < 0.0 {
            return Err(PipelineError::Config(format!(
                "hysteresis thresholds must be finite and non-negative, got low={} high={}",
                self.low, self.high
            )));
        }
        if self.low > self.high {
            return Err(PipelineError::Config(format!(
                "low threshold {} exceeds high threshold {}",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

/// Classify thinned magnitudes into a binary edge map.
///
/// Pixels >= `high` are strong and always kept. Pixels in [`low`, `high`) are
/// weak and kept only when 8-connected to a strong pixel, possibly through
/// other weak pixels. Everything else is 0.
pub fn hysteresis(magnitude: &Array2<f32>, params: &HysteresisParams) -> Result<EdgeMap> {
    params.validate()?;
    let (height, width) = magnitude.dim();
    let mut output = zeros_2d::<u8>(height, width)?;

    // Flood fill from every strong pixel
    let mut queue = VecDeque::new();
    for ((y, x), &mag) in magnitude.indexed_iter() {
        if mag > 0.0 && mag >= params.high {
            output[[y, x]] = 255;
            queue.push_back((x, y));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                let mag = magnitude[[ny, nx]];
                if output[[ny, nx]] == 0 && mag > 0.0 && mag >= params.low {
                    output[[ny, nx]] = 255;
                    queue.push_back((nx, ny));
                }
            }
        }
    }

    Ok(EdgeMap::from_array(output, ValueSemantics::Binary))
}

/// Sobel gradients, non-maximum suppression and hysteresis in one call.
pub fn canny(input: &IntensityMap, params: &HysteresisParams) -> Result<EdgeMap> {
    params.validate()?;
    let grad = sobel_gradients(input)?;
    let thinned = non_max_suppression(&grad)?;
    hysteresis(&thinned, params)
}
