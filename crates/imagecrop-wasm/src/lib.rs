//! Imagecrop WASM - WebAssembly bindings for the crop overlay
//!
//! This crate exposes `imagecrop-core` to a JavaScript presentation layer.
//! The host renders the image and overlay; this crate owns the crop state.
//!
//! # Module Structure
//!
//! - `cropper` - the `ImageCropper` handle receiving UI events
//! - `session` - scoped window listener registration
//! - `types` - WASM-compatible wrapper types for crop geometry
//!
//! # Usage
//!
//! ```typescript
//! import init, { ImageCropper } from '@imagecrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const cropper = new ImageCropper();
//! img.onload = () => cropper.on_image_load(img.naturalWidth, img.naturalHeight);
//! const session = cropper.attach(() => render(cropper.view()));
//! ```

use wasm_bindgen::prelude::*;

mod cropper;
mod session;
mod types;

// Re-export public types
pub use cropper::ImageCropper;
pub use session::CropSession;
pub use types::{JsCrop, JsImageSize};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Fails only if the host already installed a logger; keep that one
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Change the console log level (`"off"`, `"error"`, ... `"trace"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let level: log::LevelFilter = level
        .parse()
        .map_err(|_| JsValue::from_str(&format!("Invalid log level: {}", level)))?;
    log::set_max_level(level);
    Ok(())
}

/// Read the natural display size from encoded JPEG or PNG bytes.
///
/// EXIF rotations of 90° or 270° swap the reported dimensions, matching
/// `naturalWidth`/`naturalHeight` of an `<img>` element.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const size = probe_image_size(bytes);
/// cropper.on_image_load(size.width, size.height);
/// ```
#[wasm_bindgen]
pub fn probe_image_size(bytes: &[u8]) -> Result<JsImageSize, JsValue> {
    imagecrop_core::probe_image_size(bytes)
        .map(JsImageSize::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
