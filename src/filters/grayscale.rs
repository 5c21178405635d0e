//! Frame to intensity conversion.
//!
//! - **YUV 4:2:0**: the luma plane is the intensity, copied row by row.
//!   Chroma layout only matters for size validation.
//! - **RGB / RGBA / ARGB**: unweighted channel mean, `round((R + G + B) / 3)`.
//!   Alpha is ignored.

use log::trace;
use ndarray::Array2;

use crate::error::{alloc_zeroed, Result};
use crate::frame::Frame;
use crate::image::IntensityMap;

/// Rounded mean of three 8-bit channels.
#[inline]
pub fn rgb_mean(r: u8, g: u8, b: u8) -> u8 {
    let sum = r as u32 + g as u32 + b as u32;
    // sum / 3 has fractional part 0, 1/3 or 2/3, so +1 rounds to nearest
    ((sum + 1) / 3).min(255) as u8
}

/// Convert a captured frame to an intensity map.
///
/// # Arguments
/// * `frame` - Validated frame view
///
/// # Returns
/// Map with `width * height` samples
pub fn normalize(frame: &Frame) -> Result<IntensityMap> {
    let (width, height) = (frame.width(), frame.height());
    trace!("normalize {} {}x{} stride={}", frame.format(), width, height, frame.stride());

    let mut samples = alloc_zeroed::<u8>(width * height)?;
    let rows = samples.chunks_exact_mut(width);

    match frame.format().rgb_offsets() {
        None => {
            for (y, out) in rows.enumerate() {
                out.copy_from_slice(frame.row(y));
            }
        }
        Some([r, g, b]) => {
            let bpp = frame.format().bytes_per_pixel();
            for (y, out) in rows.enumerate() {
                for (dst, px) in out.iter_mut().zip(frame.row(y).chunks_exact(bpp)) {
                    *dst = rgb_mean(px[r], px[g], px[b]);
                }
            }
        }
    }

    Ok(IntensityMap::from_array(Array2::from_shape_vec((height, width), samples)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{ChromaLayout, FrameFormat};

    fn yuv_buffer(width: usize, height: usize, luma: &[u8], u: u8, v: u8, layout: ChromaLayout) -> Vec<u8> {
        let chroma = width.div_ceil(2) * height.div_ceil(2);
        let mut data = luma.to_vec();
        match layout {
            ChromaLayout::I420 => {
                data.extend(std::iter::repeat(u).take(chroma));
                data.extend(std::iter::repeat(v).take(chroma));
            }
            ChromaLayout::Yv12 => {
                data.extend(std::iter::repeat(v).take(chroma));
                data.extend(std::iter::repeat(u).take(chroma));
            }
            ChromaLayout::Nv12 => (0..chroma).for_each(|_| data.extend([u, v])),
            ChromaLayout::Nv21 => (0..chroma).for_each(|_| data.extend([v, u])),
        }
        data
    }

    #[test]
    fn test_rgb_mean_rounding() {
        assert_eq!(rgb_mean(0, 0, 0), 0);
        assert_eq!(rgb_mean(255, 255, 255), 255);
        assert_eq!(rgb_mean(1, 0, 0), 0); // 0.33
        assert_eq!(rgb_mean(1, 1, 0), 1); // 0.67
        assert_eq!(rgb_mean(255, 0, 0), 85);
        assert_eq!(rgb_mean(200, 100, 51), 117);
    }

    #[test]
    fn test_yuv_luma_verbatim_for_every_layout() {
        let luma: Vec<u8> = (0..12).map(|i| i * 20).collect();
        for layout in [ChromaLayout::I420, ChromaLayout::Yv12, ChromaLayout::Nv12, ChromaLayout::Nv21] {
            let data = yuv_buffer(4, 3, &luma, 90, 240, layout);
            let frame = Frame::new(&data, 4, 3, FrameFormat::Yuv420(layout)).unwrap();
            let result = normalize(&frame).unwrap();
            assert_eq!(result.as_slice(), luma.as_slice(), "{layout:?}");
        }
    }

    #[test]
    fn test_swapping_chroma_does_not_change_output() {
        let luma = vec![7u8; 16];
        let a = yuv_buffer(4, 4, &luma, 10, 200, ChromaLayout::Nv21);
        let b = yuv_buffer(4, 4, &luma, 200, 10, ChromaLayout::Nv21);
        let fa = Frame::new(&a, 4, 4, FrameFormat::Yuv420(ChromaLayout::Nv21)).unwrap();
        let fb = Frame::new(&b, 4, 4, FrameFormat::Yuv420(ChromaLayout::Nv21)).unwrap();
        assert_eq!(normalize(&fa).unwrap(), normalize(&fb).unwrap());
    }

    #[test]
    fn test_yuv_honors_stride() {
        // 3x2 luma in rows of 4 bytes, padding byte 99
        let mut data = vec![1, 2, 3, 99, 4, 5, 6, 99];
        data.extend([128u8; 4]); // ceil(4/2) * 1 * 2 chroma bytes
        let frame = Frame::with_stride(&data, 3, 2, 4, FrameFormat::Yuv420(ChromaLayout::Nv12)).unwrap();
        let result = normalize(&frame).unwrap();
        assert_eq!(result.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_rgb_and_argb_offsets() {
        let rgb = [255u8, 0, 0, 30, 60, 90];
        let frame = Frame::new(&rgb, 2, 1, FrameFormat::Rgb).unwrap();
        assert_eq!(normalize(&frame).unwrap().as_slice(), &[85, 60]);

        let argb = [0u8, 255, 0, 0, 255, 30, 60, 90];
        let frame = Frame::new(&argb, 2, 1, FrameFormat::Argb).unwrap();
        assert_eq!(normalize(&frame).unwrap().as_slice(), &[85, 60]);

        let rgba = [255u8, 0, 0, 7, 30, 60, 90, 7];
        let frame = Frame::new(&rgba, 2, 1, FrameFormat::Rgba).unwrap();
        assert_eq!(normalize(&frame).unwrap().as_slice(), &[85, 60]);
    }

    #[test]
    fn test_output_len_matches_dimensions() {
        for (w, h) in [(1, 1), (3, 5), (16, 9)] {
            let data = vec![200u8; w * h * 4];
            let frame = Frame::new(&data, w, h, FrameFormat::Rgba).unwrap();
            let result = normalize(&frame).unwrap();
            assert_eq!(result.as_slice().len(), w * h);
            assert_eq!((result.width(), result.height()), (w, h));
        }
    }
}
