//! Pointer and keyboard interaction for the crop overlay.
//!
//! Handlers in this module are pure: they take the current state and an
//! input event and return a candidate crop. The candidate is not yet
//! contained; [`CropStore`](crate::store::CropStore) runs it through the
//! containment policy before storing it.
//!
//! ## Gestures
//!
//! - **Drag**: pointer down on the overlay body moves the whole rectangle
//! - **Resize**: pointer down on a corner handle changes the width; the
//!   height always follows the aspect ratio
//! - **Keys**: arrows nudge, `+`/`-` grow and shrink, `r` resets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::{Crop, Point};

pub mod keyboard;
pub mod pointer;

pub use keyboard::{KeyDirective, Modifiers};

/// Corner handle a resize gesture started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDirection {
    /// Top-left
    Nw,
    /// Top-right
    Ne,
    /// Bottom-left
    Sw,
    /// Bottom-right
    Se,
}

impl ResizeDirection {
    /// All handles in render order.
    pub const ALL: [ResizeDirection; 4] = [
        ResizeDirection::Nw,
        ResizeDirection::Ne,
        ResizeDirection::Sw,
        ResizeDirection::Se,
    ];

    /// Short name used by the presentation layer (`"nw"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeDirection::Nw => "nw",
            ResizeDirection::Ne => "ne",
            ResizeDirection::Sw => "sw",
            ResizeDirection::Se => "se",
        }
    }

    /// Handle sits on the top edge.
    #[inline]
    pub fn is_north(self) -> bool {
        matches!(self, ResizeDirection::Nw | ResizeDirection::Ne)
    }

    /// Handle sits on the right edge and moves it.
    #[inline]
    pub fn is_east(self) -> bool {
        matches!(self, ResizeDirection::Ne | ResizeDirection::Se)
    }

    /// Handle sits on the left edge and moves it.
    #[inline]
    pub fn is_west(self) -> bool {
        matches!(self, ResizeDirection::Nw | ResizeDirection::Sw)
    }
}

impl FromStr for ResizeDirection {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nw" => Ok(ResizeDirection::Nw),
            "ne" => Ok(ResizeDirection::Ne),
            "sw" => Ok(ResizeDirection::Sw),
            "se" => Ok(ResizeDirection::Se),
            other => Err(CropError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for ResizeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the pointer is currently doing to the crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "direction", rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging,
    Resizing(ResizeDirection),
}

impl InteractionMode {
    /// Check if a drag or resize is in progress
    pub fn is_active(self) -> bool {
        !matches!(self, InteractionMode::Idle)
    }
}

/// Pointer position and crop captured when a gesture begins.
///
/// Every pointer move during the gesture is measured against this
/// snapshot, so intermediate clamping never accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionStart {
    pub start_x: f64,
    pub start_y: f64,
    pub initial_crop: Crop,
}

impl ActionStart {
    pub fn new(pointer: Point, initial_crop: Crop) -> Self {
        Self {
            start_x: pointer.x,
            start_y: pointer.y,
            initial_crop,
        }
    }

    /// Pointer movement since the gesture began.
    #[inline]
    pub fn delta(&self, pointer: Point) -> (f64, f64) {
        (pointer.x - self.start_x, pointer.y - self.start_y)
    }
}
