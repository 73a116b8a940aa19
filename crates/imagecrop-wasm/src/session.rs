//! Window listener registration scoped to a session value.
//!
//! Pointer moves and releases must be observed on the window, not the
//! overlay, so a drag keeps tracking when the pointer leaves the
//! rectangle. A `CropSession` registers `mousemove`, `mouseup` and
//! `keydown` listeners when created and removes them when dropped, either
//! through `detach()` or wasm-bindgen's finalizer.
//!
//! Key presses aimed at form fields or editable content are left to the
//! page. Other keys suppress the browser default only when the crop moved.

use std::cell::RefCell;
use std::rc::Rc;

use imagecrop_core::{CropStore, Modifiers, Point};
use log::{debug, error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent};

/// One registered listener. Removed from its target on drop.
struct WindowListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl WindowListener {
    fn register(
        target: &EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        let removed = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
        if let Err(err) = removed {
            warn!("failed to remove {} listener: {:?}", self.event, err);
        }
    }
}

/// Live window listeners feeding one cropper.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropper = new ImageCropper();
/// const session = cropper.attach(() => render(cropper.view()));
///
/// // On unmount
/// session.detach();
/// ```
#[wasm_bindgen]
pub struct CropSession {
    listeners: Vec<WindowListener>,
}

#[wasm_bindgen]
impl CropSession {
    /// Number of listeners currently registered.
    #[wasm_bindgen(getter)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Remove all listeners now instead of waiting for the finalizer.
    pub fn detach(self) {
        debug!("detaching {} window listeners", self.listeners.len());
    }
}

impl CropSession {
    /// Register window listeners that drive `store` and call `on_change`
    /// after every update that affects rendering.
    pub(crate) fn attach(
        store: Rc<RefCell<CropStore>>,
        on_change: js_sys::Function,
    ) -> Result<CropSession, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let target = EventTarget::from(window);

        let on_move = {
            let store = Rc::clone(&store);
            let on_change = on_change.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let position = Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
                if update(&store, |s| s.pointer_move(position)) {
                    notify(&on_change);
                }
            })
        };

        let on_up = {
            let store = Rc::clone(&store);
            let on_change = on_change.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                if update(&store, CropStore::pointer_up) {
                    notify(&on_change);
                }
            })
        };

        let on_key = {
            let store = Rc::clone(&store);
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if is_editable_target(&event) {
                    return;
                }
                let key = key_event.key();
                let modifiers = Modifiers::new(key_event.shift_key(), key_event.ctrl_key());
                if update(&store, |s| s.key_down(&key, modifiers)) {
                    event.prevent_default();
                    notify(&on_change);
                }
            })
        };

        // Listeners registered so far are dropped (and removed) if a later one fails
        let listeners = vec![
            WindowListener::register(&target, "mousemove", on_move)?,
            WindowListener::register(&target, "mouseup", on_up)?,
            WindowListener::register(&target, "keydown", on_key)?,
        ];
        debug!("attached {} window listeners", listeners.len());

        Ok(CropSession { listeners })
    }
}

/// Run `f` against the store unless it is already borrowed.
pub(crate) fn update(store: &RefCell<CropStore>, f: impl FnOnce(&mut CropStore) -> bool) -> bool {
    match store.try_borrow_mut() {
        Ok(mut store) => f(&mut store),
        Err(_) => {
            warn!("crop store busy, dropping event");
            false
        }
    }
}

fn is_editable_target(event: &Event) -> bool {
    let Some(element) = event
        .target()
        .and_then(|target| target.dyn_into::<HtmlElement>().ok())
    else {
        return false;
    };
    element.is_content_editable() || is_form_field(&element.tag_name())
}

fn is_form_field(tag_name: &str) -> bool {
    ["INPUT", "TEXTAREA", "SELECT"]
        .iter()
        .any(|field| tag_name.eq_ignore_ascii_case(field))
}

fn notify(on_change: &js_sys::Function) {
    if let Err(err) = on_change.call0(&JsValue::NULL) {
        error!("crop change callback failed: {:?}", err);
    }
}
