//! Single-channel sample planes passed between stages.
//!
//! Both map types wrap an `Array2<u8>` of shape (height, width) in standard
//! (row-major) layout, so sample `(x, y)` sits at `y * width + x` of the flat
//! slice.

use ndarray::{Array2, ArrayView2};

use crate::error::{alloc_zeroed, PipelineError, Result};

fn check_positive(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PipelineError::Format(format!(
            "map dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

/// Dense grayscale plane with samples in 0-255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityMap {
    samples: Array2<u8>,
}

impl IntensityMap {
    /// Wrap a flat row-major buffer.
    ///
    /// Fails with `Format` for a zero dimension and with `Dimension` when
    /// `samples.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, samples: Vec<u8>) -> Result<Self> {
        check_positive(width, height)?;
        let expected = width.checked_mul(height).ok_or(PipelineError::Dimension {
            expected: usize::MAX,
            actual: samples.len(),
        })?;
        if samples.len() != expected {
            return Err(PipelineError::Dimension {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            samples: Array2::from_shape_vec((height, width), samples)?,
        })
    }

    /// Map with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self> {
        check_positive(width, height)?;
        let len = width
            .checked_mul(height)
            .ok_or(PipelineError::Allocation { bytes: usize::MAX })?;
        let mut samples = alloc_zeroed::<u8>(len)?;
        samples.fill(value);
        Ok(Self {
            samples: Array2::from_shape_vec((height, width), samples)?,
        })
    }

    pub(crate) fn from_array(samples: Array2<u8>) -> Self {
        Self { samples }
    }

    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    pub fn height(&self) -> usize {
        self.samples.nrows()
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.samples[[y, x]]
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.samples.view()
    }

    /// Flat row-major samples.
    pub fn as_slice(&self) -> &[u8] {
        self.samples
            .as_slice()
            .expect("intensity maps are always in standard layout")
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.samples.into_raw_vec_and_offset().0
    }
}

/// How the values of an [`EdgeMap`] should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSemantics {
    /// Clamped gradient magnitude, 0-255.
    Magnitude,
    /// 0 for background, 255 for edge pixels.
    Binary,
}

/// Final per-frame result handed to the display side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMap {
    samples: Array2<u8>,
    semantics: ValueSemantics,
}

impl EdgeMap {
    pub(crate) fn from_array(samples: Array2<u8>, semantics: ValueSemantics) -> Self {
        Self { samples, semantics }
    }

    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    pub fn height(&self) -> usize {
        self.samples.nrows()
    }

    pub fn semantics(&self) -> ValueSemantics {
        self.semantics
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.samples[[y, x]]
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.samples.view()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.samples
            .as_slice()
            .expect("edge maps are always in standard layout")
    }

    pub fn into_array(self) -> Array2<u8> {
        self.samples
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.samples.into_raw_vec_and_offset().0
    }
}
