//! Imagecrop Core - crop overlay geometry and interaction state
//!
//! This crate provides the logic behind an interactive crop overlay: a
//! rectangle that the user drags, resizes from corner handles or nudges
//! with the keyboard, always kept inside the image and locked to an
//! aspect ratio.
//!
//! # Module Structure
//!
//! - `contain` - the containment policy every crop mutation goes through
//! - `interaction` - pointer and keyboard handlers producing candidate crops
//! - `store` - the state store tying handlers, containment and mode together
//! - `view` - the view-model a presentation layer renders from
//! - `probe` - natural image size from encoded bytes
//!
//! # Coordinate System
//!
//! - Crop coordinates are in image pixels, origin at the top-left corner
//! - Pointer coordinates are client pixels; only their deltas are used

use serde::{Deserialize, Serialize};

pub mod aspect;
pub mod config;
pub mod contain;
pub mod error;
pub mod interaction;
pub mod probe;
pub mod store;
pub mod view;

pub use aspect::{AspectPreset, AspectRatio};
pub use config::CropConfig;
pub use contain::contain;
pub use error::CropError;
pub use interaction::{ActionStart, InteractionMode, KeyDirective, Modifiers, ResizeDirection};
pub use probe::probe_image_size;
pub use store::CropStore;
pub use view::{CropView, HandleView};

/// Crop rectangle in image pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Crop {
    /// The crop shown before any interaction and restored by reset.
    pub const DEFAULT: Crop = Crop {
        x: 50.0,
        y: 50.0,
        width: 160.0,
        height: 90.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`)
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`)
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Width divided by height.
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Same rectangle moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same origin with the given width and the height implied by `ratio`.
    pub fn with_width(&self, width: f64, ratio: AspectRatio) -> Self {
        Self {
            width,
            height: width / ratio.value(),
            ..*self
        }
    }

    /// Compare all four components within `epsilon`.
    pub fn approx_eq(&self, other: &Crop, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }
}

impl Default for Crop {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Natural pixel dimensions of the loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    /// Create an image size, rejecting images with no area.
    pub fn new(width: u32, height: u32) -> Result<Self, CropError> {
        if width == 0 || height == 0 {
            return Err(CropError::EmptyImage { width, height });
        }
        Ok(Self { width, height })
    }

    /// Check if either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Pointer position in client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
