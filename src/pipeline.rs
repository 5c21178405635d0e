//! Per-frame pipeline: normalize, blur, extract edges.
//!
//! Each call is synchronous and allocates its own buffers, so independent
//! frames may be processed from any number of threads at once.

use std::time::Instant;

use log::{debug, warn};
use rayon::prelude::*;

use crate::config::{EdgeMode, PipelineConfig};
use crate::error::Result;
use crate::filters::{blur, edge, grayscale};
use crate::frame::Frame;
use crate::image::{EdgeMap, IntensityMap};

/// Run the gradient stage selected by `mode` on a smoothed map.
pub fn extract_edges(smoothed: &IntensityMap, mode: &EdgeMode) -> Result<EdgeMap> {
    match mode {
        EdgeMode::Magnitude => edge::sobel_magnitude(smoothed),
        EdgeMode::Hysteresis(params) => edge::canny(smoothed, params),
    }
}

/// Produce the edge map for one frame.
///
/// Either a complete map of the frame's dimensions is returned or an error;
/// failures are logged at `warn` before being handed back.
pub fn process_frame(frame: &Frame, config: &PipelineConfig) -> Result<EdgeMap> {
    run_stages(frame, config).inspect_err(|err| {
        warn!(
            "dropping {} {}x{} frame: {}",
            frame.format(),
            frame.width(),
            frame.height(),
            err
        );
    })
}

fn run_stages(frame: &Frame, config: &PipelineConfig) -> Result<EdgeMap> {
    config.validate()?;

    let start = Instant::now();
    let gray = grayscale::normalize(frame)?;
    let normalize_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let smoothed = blur::gaussian_blur(&gray, &config.blur)?;
    let blur_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let edges = extract_edges(&smoothed, &config.mode)?;
    let edge_ms = start.elapsed().as_secs_f64() * 1000.0;

    debug!(
        "frame {}x{}: normalize {:.3} ms, blur {:.3} ms, edges {:.3} ms ({:?})",
        frame.width(),
        frame.height(),
        normalize_ms,
        blur_ms,
        edge_ms,
        edges.semantics()
    );

    Ok(edges)
}

/// Process independent frames in parallel, one frame per task.
///
/// Results keep the input order; a failing frame does not affect the others.
pub fn process_batch(frames: &[Frame], config: &PipelineConfig) -> Vec<Result<EdgeMap>> {
    frames
        .par_iter()
        .map(|frame| process_frame(frame, config))
        .collect()
}
