//! Borrowed views over raw capture buffers.
//!
//! ## Supported Formats
//!
//! | Tag | Layout | Bytes |
//! |-----|--------|-------|
//! | `i420` | Y plane, U plane, V plane | stride*h + 2*ceil(stride/2)*ceil(h/2) |
//! | `yv12` | Y plane, V plane, U plane | same as i420 |
//! | `nv12` | Y plane, interleaved UV | same as i420 |
//! | `nv21` | Y plane, interleaved VU | same as i420 |
//! | `rgb` | R, G, B per pixel | stride*(h-1) + 3*w |
//! | `rgba` | R, G, B, A per pixel | stride*(h-1) + 4*w |
//! | `argb` | A, R, G, B per pixel | stride*(h-1) + 4*w |
//!
//! For YUV formats `stride` is the luma row stride. Bytes past the required
//! length are ignored.

use std::fmt;
use std::str::FromStr;

use crate::error::{PipelineError, Result};

/// Position of the two half-resolution chroma planes after the luma plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromaLayout {
    I420,
    Yv12,
    Nv12,
    Nv21,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// 4:2:0 subsampled YUV, luma at full resolution.
    Yuv420(ChromaLayout),
    Rgb,
    Rgba,
    Argb,
}

impl FrameFormat {
    /// Bytes per pixel of the first (or only) plane.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            FrameFormat::Yuv420(_) => 1,
            FrameFormat::Rgb => 3,
            FrameFormat::Rgba | FrameFormat::Argb => 4,
        }
    }

    /// Byte offsets of R, G, B inside one interleaved pixel.
    pub(crate) fn rgb_offsets(self) -> Option<[usize; 3]> {
        match self {
            FrameFormat::Yuv420(_) => None,
            FrameFormat::Rgb | FrameFormat::Rgba => Some([0, 1, 2]),
            FrameFormat::Argb => Some([1, 2, 3]),
        }
    }
}

impl FromStr for FrameFormat {
    type Err = PipelineError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "i420" => Ok(FrameFormat::Yuv420(ChromaLayout::I420)),
            "yv12" => Ok(FrameFormat::Yuv420(ChromaLayout::Yv12)),
            "nv12" => Ok(FrameFormat::Yuv420(ChromaLayout::Nv12)),
            "nv21" => Ok(FrameFormat::Yuv420(ChromaLayout::Nv21)),
            "rgb" => Ok(FrameFormat::Rgb),
            "rgba" => Ok(FrameFormat::Rgba),
            "argb" => Ok(FrameFormat::Argb),
            other => Err(PipelineError::Format(format!("unrecognized format tag {other:?}"))),
        }
    }
}

impl fmt::Display for FrameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            FrameFormat::Yuv420(ChromaLayout::I420) => "i420",
            FrameFormat::Yuv420(ChromaLayout::Yv12) => "yv12",
            FrameFormat::Yuv420(ChromaLayout::Nv12) => "nv12",
            FrameFormat::Yuv420(ChromaLayout::Nv21) => "nv21",
            FrameFormat::Rgb => "rgb",
            FrameFormat::Rgba => "rgba",
            FrameFormat::Argb => "argb",
        };
        f.write_str(tag)
    }
}

/// Immutable view over one captured frame.
///
/// The capture side owns the bytes; nothing here outlives the call that
/// consumes the frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    format: FrameFormat,
}

impl<'a> Frame<'a> {
    /// Frame with tightly packed rows.
    pub fn new(data: &'a [u8], width: usize, height: usize, format: FrameFormat) -> Result<Self> {
        let stride = width.saturating_mul(format.bytes_per_pixel());
        Self::with_stride(data, width, height, stride, format)
    }

    /// Frame whose rows are `stride` bytes apart.
    pub fn with_stride(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: FrameFormat,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PipelineError::Format(format!(
                "frame dimensions must be positive, got {width}x{height}"
            )));
        }
        let row_bytes = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or_else(|| PipelineError::Format("row size overflows".into()))?;
        if stride < row_bytes {
            return Err(PipelineError::Format(format!(
                "stride {stride} shorter than row of {row_bytes} bytes"
            )));
        }

        let frame = Frame {
            data,
            width,
            height,
            stride,
            format,
        };
        let required = frame.required_len()?;
        if data.len() < required {
            return Err(PipelineError::Format(format!(
                "{format} {width}x{height} needs {required} bytes, buffer has {}",
                data.len()
            )));
        }
        Ok(frame)
    }

    /// Minimum buffer length for the declared layout.
    pub fn required_len(&self) -> Result<usize> {
        let overflow = || PipelineError::Format("frame size overflows".into());
        match self.format {
            FrameFormat::Yuv420(_) => {
                let luma = self.stride.checked_mul(self.height).ok_or_else(overflow)?;
                let chroma = self
                    .stride
                    .div_ceil(2)
                    .checked_mul(self.height.div_ceil(2))
                    .and_then(|plane| plane.checked_mul(2))
                    .ok_or_else(overflow)?;
                luma.checked_add(chroma).ok_or_else(overflow)
            }
            _ => self
                .stride
                .checked_mul(self.height - 1)
                .and_then(|rows| rows.checked_add(self.width * self.format.bytes_per_pixel()))
                .ok_or_else(overflow),
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Bytes of row `y` of the first plane, without stride padding.
    pub(crate) fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width * self.format.bytes_per_pixel()]
    }
}
