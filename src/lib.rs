//! EdgeView Rust Core
//!
//! Per-frame edge detection for live camera feeds, with Python bindings via
//! PyO3 and WASM bindings for JavaScript.
//!
//! ## Pipeline
//! 1. **Normalize** - YUV 4:2:0 luma or RGB mean into a single-channel map
//! 2. **Smooth** - separable Gaussian blur with replicated borders
//! 3. **Extract** - Sobel magnitude, or NMS + hysteresis for binary edges
//!
//! Every stage is a pure function over explicit buffers; nothing is retained
//! between frames.
//!
//! ## Frame Formats
//! - **YUV 4:2:0**: I420, YV12, NV12, NV21 (luma used verbatim)
//! - **RGB**: RGB, RGBA, ARGB interleaved (unweighted channel mean)

pub mod config;
pub mod error;
pub mod filters;
pub mod frame;
pub mod image;
pub mod pipeline;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{EdgeMode, PipelineConfig};
pub use error::{PipelineError, Result};
pub use frame::{ChromaLayout, Frame, FrameFormat};
pub use image::{EdgeMap, IntensityMap, ValueSemantics};
pub use pipeline::{process_batch, process_frame};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray1};
    use pyo3::exceptions::{PyMemoryError, PyValueError};
    use pyo3::prelude::*;

    use crate::config::{EdgeMode, PipelineConfig};
    use crate::error::PipelineError;
    use crate::filters::blur::BlurParams;
    use crate::filters::edge::HysteresisParams;
    use crate::frame::{Frame, FrameFormat};
    use crate::pipeline::process_frame;

    impl From<PipelineError> for PyErr {
        fn from(err: PipelineError) -> Self {
            match err {
                PipelineError::Allocation { .. } => PyMemoryError::new_err(err.to_string()),
                _ => PyValueError::new_err(err.to_string()),
            }
        }
    }

    /// Detect edges in a raw camera frame.
    ///
    /// # Arguments
    /// * `data` - Flat u8 buffer holding the frame
    /// * `width`, `height` - Frame size in pixels
    /// * `format` - One of "i420", "yv12", "nv12", "nv21", "rgb", "rgba", "argb"
    /// * `mode` - "magnitude" (graded) or "hysteresis" (binary 0/255)
    /// * `sigma` - Gaussian sigma; 0 derives it from the 5-tap kernel
    /// * `low`, `high` - Hysteresis thresholds in Sobel magnitude units
    ///
    /// # Returns
    /// Edge map of shape (height, width)
    #[pyfunction]
    #[pyo3(signature = (data, width, height, format, mode="magnitude", sigma=1.5, low=50.0, high=150.0))]
    #[allow(clippy::too_many_arguments)]
    pub fn detect_edges<'py>(
        py: Python<'py>,
        data: PyReadonlyArray1<'py, u8>,
        width: usize,
        height: usize,
        format: &str,
        mode: &str,
        sigma: f32,
        low: f32,
        high: f32,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let mode = match mode {
            "magnitude" => EdgeMode::Magnitude,
            "hysteresis" => EdgeMode::Hysteresis(HysteresisParams { low, high }),
            other => {
                return Err(PyValueError::new_err(format!("unknown edge mode {other:?}")));
            }
        };
        let config = PipelineConfig {
            blur: BlurParams {
                sigma,
                ..BlurParams::default()
            },
            mode,
        };

        let bytes = data.as_array().to_vec();
        let format: FrameFormat = format.parse()?;
        let frame = Frame::new(&bytes, width, height, format)?;
        let edges = py.allow_threads(|| process_frame(&frame, &config))?;
        Ok(edges.into_array().into_pyarray(py))
    }

    /// EdgeView Rust extension module
    #[pymodule]
    pub fn edgeview_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(detect_edges, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::edgeview_rust;
