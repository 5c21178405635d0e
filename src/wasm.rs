//! WebAssembly exports for the edge pipeline.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Errors are
//! returned as JS strings carrying the pipeline error message.

use wasm_bindgen::prelude::*;

use crate::config::{EdgeMode, PipelineConfig};
use crate::filters::edge::HysteresisParams;
use crate::frame::{Frame, FrameFormat};
use crate::pipeline::process_frame;

fn to_js(err: crate::error::PipelineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Detect edges in a raw camera frame.
///
/// # Arguments
/// * `data` - Flat frame bytes
/// * `width` - Frame width in pixels
/// * `height` - Frame height in pixels
/// * `format` - Format tag such as "nv21" or "rgba"
/// * `hysteresis` - Binary edges via NMS + hysteresis instead of raw magnitude
///
/// # Returns
/// Flat array of `width * height` edge samples
#[wasm_bindgen]
pub fn detect_edges_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    format: &str,
    hysteresis: bool,
) -> Result<Vec<u8>, JsValue> {
    let config = PipelineConfig {
        mode: if hysteresis {
            EdgeMode::Hysteresis(HysteresisParams::default())
        } else {
            EdgeMode::Magnitude
        },
        ..PipelineConfig::default()
    };
    let format: FrameFormat = format.parse().map_err(to_js)?;
    let frame = Frame::new(data, width, height, format).map_err(to_js)?;
    let edges = process_frame(&frame, &config).map_err(to_js)?;
    Ok(edges.into_vec())
}

/// Detect edges with a JSON pipeline configuration.
#[wasm_bindgen]
pub fn detect_edges_configured_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    format: &str,
    config_json: &str,
) -> Result<Vec<u8>, JsValue> {
    let config = PipelineConfig::from_json(config_json).map_err(to_js)?;
    let format: FrameFormat = format.parse().map_err(to_js)?;
    let frame = Frame::new(data, width, height, format).map_err(to_js)?;
    let edges = process_frame(&frame, &config).map_err(to_js)?;
    Ok(edges.into_vec())
}
