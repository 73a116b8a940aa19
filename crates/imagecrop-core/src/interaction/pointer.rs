//! Pointer gesture handling: drag and corner resize.
//!
//! Positions are measured against the [`ActionStart`] snapshot taken at
//! pointer down, never against the previous move event.

use crate::aspect::AspectRatio;
use crate::{Crop, Point};

use super::{ActionStart, InteractionMode, ResizeDirection};

/// Compute the candidate crop for a pointer move.
///
/// Returns `None` when no gesture is active or no snapshot exists.
/// The result still has to be contained before it is stored.
pub fn propose(
    mode: InteractionMode,
    start: Option<&ActionStart>,
    pointer: Point,
    ratio: AspectRatio,
) -> Option<Crop> {
    let start = start?;
    let (dx, dy) = start.delta(pointer);

    match mode {
        InteractionMode::Idle => None,
        InteractionMode::Dragging => Some(drag(&start.initial_crop, dx, dy)),
        InteractionMode::Resizing(direction) => {
            Some(resize(&start.initial_crop, direction, dx, ratio))
        }
    }
}

/// Move the whole rectangle; size is unchanged.
pub fn drag(initial: &Crop, dx: f64, dy: f64) -> Crop {
    initial.translated(dx, dy)
}

/// Resize from a corner handle.
///
/// Only the horizontal delta matters: east handles move the right edge,
/// west handles move the left edge, and the height is recomputed from the
/// new width. North/south components do not drive the height.
pub fn resize(initial: &Crop, direction: ResizeDirection, dx: f64, ratio: AspectRatio) -> Crop {
    let mut x = initial.x;
    let mut width = initial.width;

    if direction.is_east() {
        width = initial.width + dx;
    }
    if direction.is_west() {
        x = initial.x + dx;
        width = initial.width - dx;
    }

    Crop {
        x,
        ..*initial
    }
    .with_width(width, ratio)
}
