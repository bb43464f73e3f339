//! Tunable parameters of the classification pipeline.
//!
//! The defaults reproduce the calibrated behaviour; the scoring thresholds
//! assume a 224×224 working image and a 50/150 edge detector, so changing
//! them shifts every category's signature.

use std::fs;
use std::path::Path;

use catalog::TipPolicy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifyError, Result};

/// Side length every input is resized to before feature work
pub const TARGET_SIZE: u32 = 224;
/// Lower hysteresis threshold of the edge detector (0-255 scale)
pub const CANNY_LOW: f32 = 50.0;
/// Upper hysteresis threshold of the edge detector (0-255 scale)
pub const CANNY_HIGH: f32 = 150.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Working image side length in pixels
    pub target_size: u32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Eco-tip selection attached to each result
    pub eco_tips: TipPolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            target_size: TARGET_SIZE,
            canny_low: CANNY_LOW,
            canny_high: CANNY_HIGH,
            eco_tips: TipPolicy::default(),
        }
    }
}

impl ClassifierConfig {
    /// Check the parameters are usable
    pub fn validate(&self) -> Result<()> {
        // interior-pixel statistics need at least one interior pixel
        if self.target_size < 3 {
            return Err(ClassifyError::InvalidConfig(format!(
                "target_size must be at least 3, got {}",
                self.target_size
            )));
        }
        if !(self.canny_low > 0.0 && self.canny_low <= self.canny_high) {
            return Err(ClassifyError::InvalidConfig(format!(
                "edge thresholds must satisfy 0 < low <= high, got {}/{}",
                self.canny_low, self.canny_high
            )));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ClassifierConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let config: ClassifierConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&fs::read_to_string(path_ref)?),
            Some("json") => Self::from_json(&fs::read_to_string(path_ref)?),
            _ => Err(ClassifyError::UnsupportedFileFormat),
        }
    }
}
