//! Tunable constants for the crop overlay.
//!
//! Hosts can override any subset of fields; missing fields fall back to the
//! defaults below when deserializing.

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;
use crate::error::CropError;
use crate::Crop;

/// Configuration for a [`CropStore`](crate::store::CropStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropConfig {
    /// Smallest allowed crop width and height in pixels.
    pub min_size: f64,
    /// Crop shown initially and restored by the reset key.
    pub default_crop: Crop,
    /// Arrow key step with no modifier.
    pub nudge_step: f64,
    /// Arrow key step with shift held.
    pub shift_step: f64,
    /// Arrow key step with control held (wins over shift).
    pub ctrl_step: f64,
    /// Width change for the grow/shrink keys.
    pub resize_step: f64,
    /// Initial aspect ratio.
    pub aspect_ratio: AspectRatio,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_size: 10.0,
            default_crop: Crop::DEFAULT,
            nudge_step: 2.0,
            shift_step: 10.0,
            ctrl_step: 50.0,
            resize_step: 10.0,
            aspect_ratio: AspectRatio::SIXTEEN_NINE,
        }
    }
}

impl CropConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every size and step is positive and finite.
    pub fn validate(&self) -> Result<(), CropError> {
        let positive = [
            ("minSize", self.min_size),
            ("nudgeStep", self.nudge_step),
            ("shiftStep", self.shift_step),
            ("ctrlStep", self.ctrl_step),
            ("resizeStep", self.resize_step),
            ("defaultCrop.width", self.default_crop.width),
            ("defaultCrop.height", self.default_crop.height),
        ];

        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CropError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !self.default_crop.x.is_finite() || !self.default_crop.y.is_finite() {
            return Err(CropError::InvalidConfig(
                "defaultCrop position must be finite".to_string(),
            ));
        }

        Ok(())
    }
}
