//! View-model for the presentation layer.
//!
//! The overlay itself (dashed border, dimmed surroundings, buttons) is
//! drawn by the host. This module computes everything the host needs to
//! draw it: overlay box, cursor names, handle boxes, preset buttons and the
//! status line.

use serde::Serialize;

use crate::aspect::AspectRatio;
use crate::interaction::{InteractionMode, ResizeDirection};
use crate::store::CropStore;
use crate::{Crop, ImageSize};

/// Side length of a corner handle in pixels.
pub const HANDLE_SIZE: f64 = 10.0;

/// Everything needed to render the overlay for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropView {
    pub crop: Crop,
    pub image: ImageSize,
    pub mode: InteractionMode,
    /// CSS cursor for the overlay body
    pub cursor: &'static str,
    pub handles: Vec<HandleView>,
    pub presets: Vec<PresetView>,
    pub status: String,
}

/// One corner handle, positioned relative to the overlay's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandleView {
    pub direction: ResizeDirection,
    pub left: f64,
    pub top: f64,
    pub size: f64,
    pub cursor: String,
}

/// One aspect ratio button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetView {
    pub label: &'static str,
    pub ratio: f64,
    pub active: bool,
}

impl CropView {
    /// Build the view for a store. `None` until an image has loaded.
    pub fn from_store(store: &CropStore) -> Option<Self> {
        let image = store.image_size()?;
        let crop = store.crop();
        let mode = store.mode();

        Some(Self {
            crop,
            image,
            mode,
            cursor: overlay_cursor(mode),
            handles: ResizeDirection::ALL
                .iter()
                .map(|&direction| HandleView::new(direction, &crop))
                .collect(),
            presets: preset_buttons(store.aspect_ratio()),
            status: status_line(&crop, mode),
        })
    }
}

impl HandleView {
    fn new(direction: ResizeDirection, crop: &Crop) -> Self {
        let half = HANDLE_SIZE / 2.0;
        let left = if direction.is_west() {
            -half
        } else {
            crop.width - half
        };
        let top = if direction.is_north() {
            -half
        } else {
            crop.height - half
        };

        Self {
            direction,
            left,
            top,
            size: HANDLE_SIZE,
            cursor: format!("{direction}-resize"),
        }
    }
}

fn overlay_cursor(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Dragging => "move",
        _ => "default",
    }
}

fn preset_buttons(active: AspectRatio) -> Vec<PresetView> {
    AspectRatio::PRESETS
        .iter()
        .map(|preset| PresetView {
            label: preset.label,
            ratio: preset.ratio.value(),
            active: preset.ratio.approx_eq(active),
        })
        .collect()
}

/// Human-readable crop readout, e.g. `"Crop Info: x: 50, y: 50, width: 160, height: 90"`.
pub fn status_line(crop: &Crop, mode: InteractionMode) -> String {
    let mut line = format!(
        "Crop Info: x: {}, y: {}, width: {}, height: {}",
        crop.x, crop.y, crop.width, crop.height
    );
    match mode {
        InteractionMode::Idle => {}
        InteractionMode::Dragging => line.push_str(" Dragging..."),
        InteractionMode::Resizing(direction) => {
            line.push_str(" Resizing: ");
            line.push_str(direction.as_str());
        }
    }
    line
}
