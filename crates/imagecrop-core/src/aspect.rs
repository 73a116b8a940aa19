//! Aspect ratio type and the preset ratios offered by the overlay.
//!
//! An aspect ratio is `width / height`. Only positive finite values are
//! representable, so the containment math can divide by it freely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CropError;

/// Tolerance used when comparing ratios for equality.
const RATIO_EPSILON: f64 = 1e-9;

/// A positive, finite width-to-height ratio.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// 1:1
    pub const SQUARE: AspectRatio = AspectRatio(1.0);
    /// 4:3
    pub const FOUR_THREE: AspectRatio = AspectRatio(4.0 / 3.0);
    /// 16:9
    pub const SIXTEEN_NINE: AspectRatio = AspectRatio(16.0 / 9.0);

    /// The ratios offered as buttons, in display order.
    pub const PRESETS: [AspectPreset; 3] = [
        AspectPreset {
            label: "1:1",
            ratio: AspectRatio::SQUARE,
        },
        AspectPreset {
            label: "4:3",
            ratio: AspectRatio::FOUR_THREE,
        },
        AspectPreset {
            label: "16:9",
            ratio: AspectRatio::SIXTEEN_NINE,
        },
    ];

    /// Create an aspect ratio, rejecting zero, negative and non-finite values.
    pub fn new(ratio: f64) -> Result<Self, CropError> {
        if ratio.is_finite() && ratio > 0.0 {
            Ok(Self(ratio))
        } else {
            Err(CropError::InvalidAspectRatio(ratio.to_string()))
        }
    }

    /// The ratio as `width / height`.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Check whether two ratios are equal within floating-point tolerance.
    pub fn approx_eq(self, other: AspectRatio) -> bool {
        (self.0 - other.0).abs() < RATIO_EPSILON
    }

    /// Label of the matching preset, if any.
    pub fn preset_label(self) -> Option<&'static str> {
        Self::PRESETS
            .iter()
            .find(|preset| preset.ratio.approx_eq(self))
            .map(|preset| preset.label)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::SIXTEEN_NINE
    }
}

impl TryFrom<f64> for AspectRatio {
    type Error = CropError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AspectRatio> for f64 {
    fn from(ratio: AspectRatio) -> Self {
        ratio.0
    }
}

impl FromStr for AspectRatio {
    type Err = CropError;

    /// Parse `"16:9"` style pairs or a plain decimal such as `"1.5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CropError::InvalidAspectRatio(s.to_string());
        let s = s.trim();

        let ratio = match s.split_once(':') {
            Some((w, h)) => {
                let w: f64 = w.trim().parse().map_err(|_| invalid())?;
                let h: f64 = h.trim().parse().map_err(|_| invalid())?;
                w / h
            }
            None => s.parse().map_err(|_| invalid())?,
        };

        Self::new(ratio).map_err(|_| invalid())
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.preset_label() {
            Some(label) => f.write_str(label),
            None => write!(f, "{:.3}", self.0),
        }
    }
}

/// A labelled aspect ratio button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectPreset {
    /// Button caption, e.g. `"16:9"`.
    pub label: &'static str,
    /// The ratio the button selects.
    pub ratio: AspectRatio,
}
