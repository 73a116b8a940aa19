//! Containment policy for crop rectangles.
//!
//! Every crop mutation, whether from a pointer gesture, a key press, a reset
//! or an aspect ratio change, passes through [`contain`] before it is
//! stored. The result always lies inside the image and matches the active
//! aspect ratio.
//!
//! # Algorithm
//!
//! 1. Clamp the width to `[min_size, image_width]`
//! 2. Derive the height from the width and the aspect ratio
//! 3. If the height overflows the image, clamp it and derive the width back
//! 4. If the height falls under the minimum, raise it and derive the width
//! 5. Clamp the origin so the rectangle ends inside the image
//!
//! Step 4 is an addition to plain width-first clamping. Without it, a
//! minimum-width crop at a ratio above 1:1 ends up shorter than the minimum
//! (10 px wide at 16:9 gives 5.625 px tall). With it, the same input
//! becomes 17.78 x 10. Ratios at or below 1:1 never reach this branch.
//!
//! Clamps are written as `max` followed by `min`, so impossible bounds
//! (an image smaller than the minimum size) degrade instead of panicking.

use crate::aspect::AspectRatio;
use crate::{Crop, ImageSize};

/// Default minimum crop width and height in pixels.
pub const MIN_CROP_SIZE: f64 = 10.0;

#[inline]
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Clamp a proposed crop to the image bounds using the default minimum size.
///
/// # Arguments
///
/// * `rect` - Proposed crop, possibly out of bounds or off-ratio
/// * `image` - Natural image dimensions
/// * `ratio` - Active aspect ratio
///
/// # Example
///
/// ```
/// use imagecrop_core::{contain, AspectRatio, Crop, ImageSize};
///
/// let image = ImageSize::new(800, 600).unwrap();
/// let crop = contain(&Crop::new(-20.0, 0.0, 2000.0, 5.0), image, AspectRatio::SQUARE);
/// assert_eq!(crop, Crop::new(0.0, 0.0, 600.0, 600.0));
/// ```
pub fn contain(rect: &Crop, image: ImageSize, ratio: AspectRatio) -> Crop {
    contain_with_min(rect, image, ratio, MIN_CROP_SIZE)
}

/// Clamp a proposed crop to the image bounds with an explicit minimum size.
pub fn contain_with_min(rect: &Crop, image: ImageSize, ratio: AspectRatio, min_size: f64) -> Crop {
    let image_width = f64::from(image.width);
    let image_height = f64::from(image.height);
    let ratio = ratio.value();

    let mut width = clamp(rect.width, min_size, image_width);
    let mut height = width / ratio;

    if height > image_height {
        height = clamp(height, min_size, image_height);
        width = height * ratio;
    } else if height < min_size {
        // Step 4: wide ratios leave a minimum-width crop shorter than the
        // minimum. Bounds still win on images too small to hold it.
        height = min_size.min(image_height);
        width = (height * ratio).min(image_width);
        height = width / ratio;
    }

    Crop {
        x: clamp(rect.x, 0.0, image_width - width),
        y: clamp(rect.y, 0.0, image_height - height),
        width,
        height,
    }
}
