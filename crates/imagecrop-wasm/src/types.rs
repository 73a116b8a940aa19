//! WASM-compatible wrapper types for crop geometry.
//!
//! These wrap the core `Crop` and `ImageSize` types with getters so that
//! JavaScript can read them as plain properties.

use imagecrop_core::{Crop, ImageSize};
use wasm_bindgen::prelude::*;

/// A crop rectangle in image pixels.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsCrop {
    inner: Crop,
}

#[wasm_bindgen]
impl JsCrop {
    #[wasm_bindgen(constructor)]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> JsCrop {
        JsCrop {
            inner: Crop::new(x, y, width, height),
        }
    }

    /// Left edge in pixels
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    /// Top edge in pixels
    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height
    }
}

impl From<Crop> for JsCrop {
    fn from(inner: Crop) -> Self {
        Self { inner }
    }
}

impl From<JsCrop> for Crop {
    fn from(crop: JsCrop) -> Self {
        crop.inner
    }
}

/// Natural image dimensions.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsImageSize {
    inner: ImageSize,
}

#[wasm_bindgen]
impl JsImageSize {
    /// Image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }
}

impl From<ImageSize> for JsImageSize {
    fn from(inner: ImageSize) -> Self {
        Self { inner }
    }
}
