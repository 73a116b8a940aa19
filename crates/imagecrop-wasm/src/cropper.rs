//! Crop overlay handle for JavaScript.
//!
//! The presentation layer owns the DOM: it renders the image, overlay,
//! handles and buttons, and forwards events here. Each event method returns
//! `true` when the view changed and should be re-rendered.

use std::cell::RefCell;
use std::rc::Rc;

use imagecrop_core::{
    AspectRatio, Crop, CropConfig, CropStore, ImageSize, InteractionMode, Modifiers, Point,
    ResizeDirection,
};
use wasm_bindgen::prelude::*;

use crate::session::{update, CropSession};
use crate::types::{JsCrop, JsImageSize};

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Interactive crop state for one image.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropper = new ImageCropper();
/// img.onload = () => cropper.on_image_load(img.naturalWidth, img.naturalHeight);
/// overlay.onmousedown = (e) => cropper.on_overlay_pointer_down(e.clientX, e.clientY);
/// const session = cropper.attach(() => render(cropper.view()));
/// ```
#[wasm_bindgen]
pub struct ImageCropper {
    store: Rc<RefCell<CropStore>>,
}

#[wasm_bindgen]
impl ImageCropper {
    /// Create a cropper with default settings (16:9, 160x90 crop at 50,50).
    #[wasm_bindgen(constructor)]
    pub fn new() -> ImageCropper {
        Self::from_store(CropStore::new())
    }

    /// Create a cropper from a partial configuration object.
    ///
    /// # Errors
    /// Returns error if the object cannot be deserialized or a value is out of range
    pub fn with_config(config: JsValue) -> Result<ImageCropper, JsValue> {
        let config: CropConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid crop config: {}", e)))?;
        let store = CropStore::with_config(config).map_err(to_js_error)?;
        Ok(Self::from_store(store))
    }

    /// Record the image's natural size. Only the first call takes effect.
    pub fn on_image_load(&self, width: u32, height: u32) -> Result<bool, JsValue> {
        let size = ImageSize::new(width, height).map_err(to_js_error)?;
        let mut store = self
            .store
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("crop store busy"))?;
        store.load_image(size).map_err(to_js_error)
    }

    /// Pointer pressed on the overlay body: start dragging.
    pub fn on_overlay_pointer_down(&self, x: f64, y: f64) -> bool {
        update(&self.store, |s| s.begin_drag(Point::new(x, y)))
    }

    /// Pointer pressed on a corner handle (`"nw"`, `"ne"`, `"sw"`, `"se"`).
    pub fn on_handle_pointer_down(&self, x: f64, y: f64, direction: &str) -> Result<bool, JsValue> {
        let direction: ResizeDirection = direction.parse().map_err(to_js_error)?;
        Ok(update(&self.store, |s| s.begin_resize(Point::new(x, y), direction)))
    }

    /// Pointer moved anywhere in the window.
    pub fn on_pointer_move(&self, x: f64, y: f64) -> bool {
        update(&self.store, |s| s.pointer_move(Point::new(x, y)))
    }

    /// Pointer released anywhere in the window.
    pub fn on_pointer_up(&self) -> bool {
        update(&self.store, CropStore::pointer_up)
    }

    /// Key pressed. Returns `true` if the key was handled.
    pub fn on_key_down(&self, key: &str, shift: bool, ctrl: bool) -> bool {
        update(&self.store, |s| s.key_down(key, Modifiers::new(shift, ctrl)))
    }

    /// Replace the crop. The rectangle is clamped to the image and ratio.
    pub fn set_crop(&self, crop: &JsCrop) -> bool {
        let crop = Crop::from(crop.clone());
        update(&self.store, |s| s.set_crop(crop))
    }

    /// Aspect ratio button pressed, as `width / height`.
    pub fn on_aspect_ratio_change(&self, ratio: f64) -> Result<bool, JsValue> {
        let ratio = AspectRatio::new(ratio).map_err(to_js_error)?;
        Ok(update(&self.store, |s| s.set_aspect_ratio(ratio)))
    }

    /// Aspect ratio chosen by label, e.g. `"4:3"`.
    pub fn on_aspect_ratio_label(&self, label: &str) -> Result<bool, JsValue> {
        let ratio: AspectRatio = label.parse().map_err(to_js_error)?;
        Ok(update(&self.store, |s| s.set_aspect_ratio(ratio)))
    }

    /// Current crop rectangle.
    #[wasm_bindgen(getter)]
    pub fn crop(&self) -> JsCrop {
        self.store.borrow().crop().into()
    }

    /// Loaded image size, or `undefined` before load.
    #[wasm_bindgen(getter)]
    pub fn image_size(&self) -> Option<JsImageSize> {
        self.store.borrow().image_size().map(JsImageSize::from)
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.store.borrow().has_image()
    }

    /// `"idle"`, `"dragging"` or `"resizing"`.
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        let mode = match self.store.borrow().mode() {
            InteractionMode::Idle => "idle",
            InteractionMode::Dragging => "dragging",
            InteractionMode::Resizing(_) => "resizing",
        };
        mode.to_string()
    }

    /// Handle being dragged while resizing.
    #[wasm_bindgen(getter)]
    pub fn resize_direction(&self) -> Option<String> {
        match self.store.borrow().mode() {
            InteractionMode::Resizing(direction) => Some(direction.to_string()),
            _ => None,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn aspect_ratio(&self) -> f64 {
        self.store.borrow().aspect_ratio().value()
    }

    /// Everything needed to render the overlay, or `null` before load.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        match self.store.borrow().view() {
            Some(view) => serde_wasm_bindgen::to_value(&view).map_err(to_js_error),
            None => Ok(JsValue::NULL),
        }
    }

    /// Register window listeners that forward events here.
    ///
    /// `on_change` is called with no arguments after every update that
    /// affects rendering. Listeners stay registered until the returned
    /// session is detached or garbage collected.
    pub fn attach(&self, on_change: js_sys::Function) -> Result<CropSession, JsValue> {
        CropSession::attach(Rc::clone(&self.store), on_change)
    }
}

impl Default for ImageCropper {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCropper {
    fn from_store(store: CropStore) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
        }
    }
}
