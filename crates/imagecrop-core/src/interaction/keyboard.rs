//! Keyboard directives: nudge, grow, shrink and reset.

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;
use crate::config::CropConfig;
use crate::Crop;

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
    };

    pub fn new(shift: bool, ctrl: bool) -> Self {
        Self { shift, ctrl }
    }

    /// Arrow key step for these modifiers. Control wins over shift.
    pub fn step(self, config: &CropConfig) -> f64 {
        let mut step = config.nudge_step;
        if self.shift {
            step = config.shift_step;
        }
        if self.ctrl {
            step = config.ctrl_step;
        }
        step
    }
}

/// A key press the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirective {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Grow,
    Shrink,
    Reset,
}

impl KeyDirective {
    /// Map a DOM `KeyboardEvent.key` value to a directive.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(KeyDirective::MoveLeft),
            "ArrowRight" => Some(KeyDirective::MoveRight),
            "ArrowUp" => Some(KeyDirective::MoveUp),
            "ArrowDown" => Some(KeyDirective::MoveDown),
            "+" => Some(KeyDirective::Grow),
            "-" => Some(KeyDirective::Shrink),
            "r" | "R" => Some(KeyDirective::Reset),
            _ => None,
        }
    }

    /// Candidate crop after this directive. Not yet contained.
    pub fn apply(self, crop: &Crop, step: f64, ratio: AspectRatio, config: &CropConfig) -> Crop {
        match self {
            KeyDirective::MoveLeft => crop.translated(-step, 0.0),
            KeyDirective::MoveRight => crop.translated(step, 0.0),
            KeyDirective::MoveUp => crop.translated(0.0, -step),
            KeyDirective::MoveDown => crop.translated(0.0, step),
            KeyDirective::Grow => crop.with_width(crop.width + config.resize_step, ratio),
            KeyDirective::Shrink => crop.with_width(crop.width - config.resize_step, ratio),
            KeyDirective::Reset => config.default_crop,
        }
    }
}
