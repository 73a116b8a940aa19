//! Crop state store.
//!
//! The store owns the crop rectangle, the interaction mode with its
//! action-start snapshot, the image size and the aspect ratio. Handlers
//! propose rectangles; the store contains them and keeps the result.
//!
//! Until an image has loaded, gesture and keyboard input is ignored. Every
//! mutating method returns `true` when something a presentation layer
//! renders has changed.

use log::{debug, warn};

use crate::aspect::AspectRatio;
use crate::config::CropConfig;
use crate::contain::contain_with_min;
use crate::error::CropError;
use crate::interaction::{
    pointer, ActionStart, InteractionMode, KeyDirective, Modifiers, ResizeDirection,
};
use crate::view::CropView;
use crate::{Crop, ImageSize, Point};

/// State behind one crop overlay.
#[derive(Debug, Clone)]
pub struct CropStore {
    config: CropConfig,
    crop: Crop,
    mode: InteractionMode,
    action: Option<ActionStart>,
    image: Option<ImageSize>,
    ratio: AspectRatio,
}

impl Default for CropStore {
    fn default() -> Self {
        Self::from_valid_config(CropConfig::default())
    }
}

impl CropStore {
    /// Create a store with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidConfig` if a size or step is not positive.
    pub fn with_config(config: CropConfig) -> Result<Self, CropError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CropConfig) -> Self {
        Self {
            crop: config.default_crop,
            ratio: config.aspect_ratio,
            mode: InteractionMode::Idle,
            action: None,
            image: None,
            config,
        }
    }

    /// Current crop rectangle.
    pub fn crop(&self) -> Crop {
        self.crop
    }

    /// Current interaction mode.
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Snapshot of the gesture in progress, if any.
    pub fn action_start(&self) -> Option<&ActionStart> {
        self.action.as_ref()
    }

    /// Natural size of the loaded image.
    pub fn image_size(&self) -> Option<ImageSize> {
        self.image
    }

    /// Check if an image has finished loading
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Active aspect ratio.
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.ratio
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// View-model for the presentation layer; `None` until an image loads.
    pub fn view(&self) -> Option<CropView> {
        CropView::from_store(self)
    }

    /// Record the loaded image's natural size.
    ///
    /// The size is set once. Later load signals are ignored and return
    /// `Ok(false)`. The current crop is contained against the new bounds.
    ///
    /// # Errors
    ///
    /// Returns `CropError::EmptyImage` if either dimension is zero.
    pub fn load_image(&mut self, size: ImageSize) -> Result<bool, CropError> {
        if size.is_empty() {
            return Err(CropError::EmptyImage {
                width: size.width,
                height: size.height,
            });
        }

        if let Some(existing) = self.image {
            warn!(
                "ignoring image load {}x{}: already loaded {}x{}",
                size.width, size.height, existing.width, existing.height
            );
            return Ok(false);
        }

        debug!("image loaded: {}x{}", size.width, size.height);
        self.image = Some(size);
        self.store(self.crop);
        Ok(true)
    }

    /// Contain and store a crop rectangle.
    pub fn set_crop(&mut self, rect: Crop) -> bool {
        self.store(rect)
    }

    /// Switch aspect ratio and re-contain the current crop.
    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) -> bool {
        let ratio_changed = !self.ratio.approx_eq(ratio);
        self.ratio = ratio;
        debug!("aspect ratio set to {ratio}");
        let crop_changed = self.store(self.crop);
        ratio_changed || crop_changed
    }

    /// Start moving the whole rectangle.
    pub fn begin_drag(&mut self, pointer: Point) -> bool {
        self.begin(pointer, InteractionMode::Dragging)
    }

    /// Start resizing from a corner handle.
    pub fn begin_resize(&mut self, pointer: Point, direction: ResizeDirection) -> bool {
        self.begin(pointer, InteractionMode::Resizing(direction))
    }

    fn begin(&mut self, pointer: Point, mode: InteractionMode) -> bool {
        if self.image.is_none() {
            return false;
        }
        debug!("gesture start: {mode:?} at ({}, {})", pointer.x, pointer.y);
        self.action = Some(ActionStart::new(pointer, self.crop));
        self.mode = mode;
        true
    }

    /// Return to idle and drop the snapshot. Returns whether a gesture ended.
    pub fn end_gesture(&mut self) -> bool {
        let was_active = self.mode.is_active() || self.action.is_some();
        if was_active {
            debug!("gesture end: {:?}", self.mode);
        }
        self.mode = InteractionMode::Idle;
        self.action = None;
        was_active
    }

    /// Apply a pointer move to the gesture in progress.
    pub fn pointer_move(&mut self, position: Point) -> bool {
        if self.image.is_none() {
            return false;
        }
        match pointer::propose(self.mode, self.action.as_ref(), position, self.ratio) {
            Some(candidate) => self.store(candidate),
            None => false,
        }
    }

    /// Finish the gesture in progress, if any.
    pub fn pointer_up(&mut self) -> bool {
        if self.mode.is_active() {
            self.end_gesture()
        } else {
            false
        }
    }

    /// Handle a key press by its DOM key name.
    ///
    /// Returns `true` only if the key maps to a directive and the crop moved,
    /// so the host suppresses the browser's default action only then.
    pub fn key_down(&mut self, key: &str, modifiers: Modifiers) -> bool {
        match KeyDirective::from_key(key) {
            Some(directive) => self.apply_directive(directive, modifiers),
            None => false,
        }
    }

    /// Apply a keyboard directive. Returns whether the crop changed.
    pub fn apply_directive(&mut self, directive: KeyDirective, modifiers: Modifiers) -> bool {
        if self.image.is_none() {
            return false;
        }
        let step = modifiers.step(&self.config);
        let candidate = directive.apply(&self.crop, step, self.ratio, &self.config);
        self.store(candidate)
    }

    fn store(&mut self, rect: Crop) -> bool {
        let Some(image) = self.image else {
            return false;
        };
        let contained = contain_with_min(&rect, image, self.ratio, self.config.min_size);
        let changed = contained != self.crop;
        self.crop = contained;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn loaded(width: u32, height: u32) -> CropStore {
        let mut store = CropStore::new();
        store.load_image(ImageSize::new(width, height).unwrap()).unwrap();
        store
    }

    #[test]
    fn test_new_store() {
        let store = CropStore::new();
        assert_eq!(store.crop(), Crop::DEFAULT);
        assert_eq!(store.mode(), InteractionMode::Idle);
        assert!(store.action_start().is_none());
        assert!(!store.has_image());
        assert_eq!(store.aspect_ratio(), AspectRatio::SIXTEEN_NINE);
        assert!(store.view().is_none());
    }

    #[test]
    fn test_with_config_validates() {
        let mut config = CropConfig::default();
        config.ctrl_step = -1.0;
        assert!(CropStore::with_config(config).is_err());
    }

    #[test]
    fn test_with_config_applies_ratio_and_crop() {
        let mut config = CropConfig::default();
        config.aspect_ratio = AspectRatio::SQUARE;
        config.default_crop = Crop::new(0.0, 0.0, 50.0, 50.0);
        let store = CropStore::with_config(config).unwrap();
        assert_eq!(store.aspect_ratio(), AspectRatio::SQUARE);
        assert_eq!(store.crop(), Crop::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_load_image_contains_crop() {
        let mut store = CropStore::new();
        assert!(store.load_image(ImageSize::new(100, 100).unwrap()).unwrap());
        let crop = store.crop();
        assert!(crop.right() <= 100.0 + EPS);
        assert!(crop.bottom() <= 100.0 + EPS);
    }

    #[test]
    fn test_load_image_rejects_empty() {
        let mut store = CropStore::new();
        let result = store.load_image(ImageSize {
            width: 0,
            height: 0,
        });
        assert!(matches!(result, Err(CropError::EmptyImage { .. })));
        assert!(!store.has_image());
    }

    #[test]
    fn test_second_load_is_ignored() {
        let mut store = loaded(800, 600);
        assert!(!store.load_image(ImageSize::new(20, 20).unwrap()).unwrap());
        assert_eq!(store.image_size(), Some(ImageSize::new(800, 600).unwrap()));
    }

    #[test]
    fn test_inputs_ignored_without_image() {
        let mut store = CropStore::new();
        assert!(!store.begin_drag(Point::new(0.0, 0.0)));
        assert_eq!(store.mode(), InteractionMode::Idle);
        assert!(!store.pointer_move(Point::new(50.0, 50.0)));
        assert!(!store.key_down("ArrowRight", Modifiers::NONE));
        assert!(!store.set_crop(Crop::new(1.0, 1.0, 20.0, 20.0)));
        assert_eq!(store.crop(), Crop::DEFAULT);
    }

    #[test]
    fn test_shift_arrow_right_five_times() {
        let mut store = loaded(800, 600);
        for _ in 0..5 {
            assert!(store.key_down("ArrowRight", Modifiers::SHIFT));
        }
        let crop = store.crop();
        assert!((crop.x - 100.0).abs() < EPS);
        assert!((crop.y - 50.0).abs() < EPS);
    }

    #[test]
    fn test_ctrl_arrow_down() {
        let mut store = loaded(800, 600);
        store.key_down("ArrowDown", Modifiers::new(true, true));
        assert!((store.crop().y - 100.0).abs() < EPS);
    }

    #[test]
    fn test_unknown_key_not_handled() {
        let mut store = loaded(800, 600);
        assert!(!store.key_down("Tab", Modifiers::NONE));
        assert!(store.crop().approx_eq(&Crop::DEFAULT, EPS));
    }

    #[test]
    fn test_arrow_stops_at_edge() {
        let mut store = loaded(800, 600);
        for _ in 0..10 {
            store.key_down("ArrowLeft", Modifiers::CTRL);
        }
        assert_eq!(store.crop().x, 0.0);
    }

    #[test]
    fn test_key_without_movement_reports_no_change() {
        let mut store = loaded(800, 600);
        // Already at the default crop
        assert!(!store.key_down("r", Modifiers::NONE));

        store.set_crop(Crop::new(0.0, 50.0, 160.0, 90.0));
        assert!(!store.key_down("ArrowLeft", Modifiers::NONE));
        assert_eq!(store.crop().x, 0.0);
        assert!(store.key_down("ArrowRight", Modifiers::NONE));
    }

    #[test]
    fn test_grow_and_shrink_keep_ratio() {
        let mut store = loaded(800, 600);
        store.key_down("+", Modifiers::NONE);
        let crop = store.crop();
        assert!((crop.width - 170.0).abs() < EPS);
        assert!((crop.ratio() - AspectRatio::SIXTEEN_NINE.value()).abs() < EPS);

        store.key_down("-", Modifiers::NONE);
        store.key_down("-", Modifiers::NONE);
        assert!((store.crop().width - 150.0).abs() < EPS);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut store = loaded(800, 600);
        store.set_crop(Crop::new(300.0, 300.0, 400.0, 225.0));
        store.key_down("R", Modifiers::NONE);
        assert!(store.crop().approx_eq(&Crop::DEFAULT, EPS));
    }

    #[test]
    fn test_reset_clamped_to_small_image() {
        let mut store = loaded(120, 100);
        store.key_down("r", Modifiers::NONE);
        let crop = store.crop();
        assert!(crop.right() <= 120.0 + EPS);
        assert!(crop.bottom() <= 100.0 + EPS);
        assert!((crop.ratio() - AspectRatio::SIXTEEN_NINE.value()).abs() < EPS);
    }

    #[test]
    fn test_drag_gesture() {
        let mut store = loaded(800, 600);
        assert!(store.begin_drag(Point::new(100.0, 100.0)));
        assert_eq!(store.mode(), InteractionMode::Dragging);
        assert!(store.action_start().is_some());

        assert!(store.pointer_move(Point::new(130.0, 120.0)));
        assert!((store.crop().x - 80.0).abs() < EPS);
        assert!((store.crop().y - 70.0).abs() < EPS);

        assert!(store.pointer_up());
        assert_eq!(store.mode(), InteractionMode::Idle);
        assert!(store.action_start().is_none());
    }

    #[test]
    fn test_drag_there_and_back() {
        let mut store = loaded(800, 600);
        let original = store.crop();
        store.begin_drag(Point::new(400.0, 300.0));
        store.pointer_move(Point::new(437.0, 281.0));
        store.pointer_move(Point::new(400.0, 300.0));
        assert!(store.crop().approx_eq(&original, EPS));
    }

    #[test]
    fn test_drag_clamped_at_boundary() {
        let mut store = loaded(800, 600);
        store.begin_drag(Point::new(0.0, 0.0));
        store.pointer_move(Point::new(5000.0, 5000.0));
        let crop = store.crop();
        assert!((crop.right() - 800.0).abs() < EPS);
        assert!((crop.bottom() - 600.0).abs() < EPS);
    }

    #[test]
    fn test_resize_se_large_delta() {
        let mut store = loaded(800, 600);
        store.begin_resize(Point::new(210.0, 140.0), ResizeDirection::Se);
        assert_eq!(
            store.mode(),
            InteractionMode::Resizing(ResizeDirection::Se)
        );
        store.pointer_move(Point::new(910.0, 140.0));

        let crop = store.crop();
        assert!(crop.width <= 800.0 - crop.x + EPS);
        assert!(crop.height <= 600.0);
        assert!((crop.height - crop.width / AspectRatio::SIXTEEN_NINE.value()).abs() < EPS);
    }

    #[test]
    fn test_resize_nw_shrinks_from_left() {
        let mut store = loaded(800, 600);
        store.begin_resize(Point::new(50.0, 50.0), ResizeDirection::Nw);
        store.pointer_move(Point::new(66.0, 90.0));
        let crop = store.crop();
        assert!((crop.x - 66.0).abs() < EPS);
        assert!((crop.width - 144.0).abs() < EPS);
        assert!((crop.height - 81.0).abs() < EPS);
    }

    #[test]
    fn test_move_after_gesture_end_is_noop() {
        let mut store = loaded(800, 600);
        store.begin_drag(Point::new(0.0, 0.0));
        store.end_gesture();
        let before = store.crop();
        assert!(!store.pointer_move(Point::new(100.0, 100.0)));
        assert_eq!(store.crop(), before);
    }

    #[test]
    fn test_pointer_up_when_idle() {
        let mut store = loaded(800, 600);
        assert!(!store.pointer_up());
    }

    #[test]
    fn test_new_gesture_replaces_snapshot() {
        let mut store = loaded(800, 600);
        store.begin_drag(Point::new(0.0, 0.0));
        store.pointer_move(Point::new(20.0, 0.0));
        store.begin_resize(Point::new(500.0, 500.0), ResizeDirection::Ne);
        let start = store.action_start().unwrap();
        assert_eq!(start.start_x, 500.0);
        assert!((start.initial_crop.x - 70.0).abs() < EPS);
    }

    #[test]
    fn test_aspect_ratio_change_recontains() {
        let mut store = loaded(800, 600);
        assert!(store.set_aspect_ratio(AspectRatio::SQUARE));
        let crop = store.crop();
        assert!((crop.width - 160.0).abs() < EPS);
        assert!((crop.height - 160.0).abs() < EPS);
    }

    #[test]
    fn test_aspect_ratio_change_without_image() {
        let mut store = CropStore::new();
        assert!(store.set_aspect_ratio(AspectRatio::FOUR_THREE));
        assert_eq!(store.aspect_ratio(), AspectRatio::FOUR_THREE);
        assert_eq!(store.crop(), Crop::DEFAULT);
    }

    #[test]
    fn test_same_aspect_ratio_reports_no_change() {
        let mut store = loaded(800, 600);
        assert!(!store.set_aspect_ratio(AspectRatio::SIXTEEN_NINE));
    }

    #[test]
    fn test_custom_steps() {
        let mut config = CropConfig::default();
        config.nudge_step = 1.0;
        let mut store = CropStore::with_config(config).unwrap();
        store.load_image(ImageSize::new(800, 600).unwrap()).unwrap();
        store.key_down("ArrowRight", Modifiers::NONE);
        assert!((store.crop().x - 51.0).abs() < EPS);
    }
}
