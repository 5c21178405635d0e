//! Pipeline configuration.
//!
//! Every section has defaults, so `{}` is a valid configuration:
//!
//! ```json
//! {
//!   "blur": { "sigma": 1.5, "radius": 2 },
//!   "mode": { "type": "hysteresis", "low": 50.0, "high": 150.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filters::blur::BlurParams;
use crate::filters::edge::HysteresisParams;

/// How the gradient stage turns gradients into the final map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeMode {
    /// Clamped Sobel magnitude.
    #[default]
    Magnitude,
    /// Non-maximum suppression followed by two-threshold hysteresis.
    Hysteresis(HysteresisParams),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub blur: BlurParams,
    pub mode: EdgeMode,
}

impl PipelineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.blur.validate()?;
        if let EdgeMode::Hysteresis(params) = &self.mode {
            params.validate()?;
        }
        Ok(())
    }
}
