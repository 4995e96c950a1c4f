use std::cell::{Cell, RefCell};
use std::rc::Rc;

use drift_engine::{FrameCallback, FrameHandle, FrameScheduler};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

struct RafState {
    next_id: Cell<u32>,
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    /// Outstanding `requestAnimationFrame` id, if any.
    raf_id: Cell<Option<i32>>,
    /// JS callback invoked after every frame's callbacks have run.
    listener: RefCell<Option<js_sys::Function>>,
}

/// `FrameScheduler` over `window.requestAnimationFrame`.
///
/// All callbacks scheduled for the same display frame share one browser
/// request. Each request carries a one-shot closure that JS frees after it
/// fires; a cancelled request leaks its closure, which only happens on
/// pause and unmount. Clones share state.
#[derive(Clone)]
pub struct RafScheduler {
    state: Rc<RafState>,
}

impl RafScheduler {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RafState {
                next_id: Cell::new(0),
                pending: RefCell::new(Vec::new()),
                raf_id: Cell::new(None),
                listener: RefCell::new(None),
            }),
        }
    }

    /// Set (or clear) the function called with the timestamp after each frame.
    pub fn set_listener(&self, listener: Option<js_sys::Function>) {
        *self.state.listener.borrow_mut() = listener;
    }

    /// Call the listener outside a display frame, e.g. after a paused resize.
    pub fn notify(&self, timestamp_ms: f64) {
        notify_listener(&self.state, timestamp_ms);
    }

    fn request(&self) {
        if self.state.raf_id.get().is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            log::warn!("no window; animation frame not requested");
            return;
        };
        let weak = Rc::downgrade(&self.state);
        let trampoline = Closure::once_into_js(move |timestamp_ms: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.raf_id.set(None);
            let due = state.pending.take();
            for (_, callback) in due {
                callback(timestamp_ms);
            }
            notify_listener(&state, timestamp_ms);
        });
        match window.request_animation_frame(trampoline.unchecked_ref()) {
            Ok(id) => self.state.raf_id.set(Some(id)),
            Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
        }
    }

    fn cancel_request(&self) {
        let Some(id) = self.state.raf_id.take() else {
            return;
        };
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.cancel_animation_frame(id) {
                log::error!("cancelAnimationFrame failed: {:?}", err);
            }
        }
    }
}

impl Default for RafScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.state.next_id.get());
        self.state.next_id.set(handle.0.wrapping_add(1));
        self.state.pending.borrow_mut().push((handle, callback));
        self.request();
        handle
    }

    fn cancel(&self, handle: FrameHandle) {
        let empty = {
            let mut pending = self.state.pending.borrow_mut();
            pending.retain(|(h, _)| *h != handle);
            pending.is_empty()
        };
        if empty {
            self.cancel_request();
        }
    }
}

fn notify_listener(state: &RafState, timestamp_ms: f64) {
    // Clone out so the listener may replace itself.
    let listener = state.listener.borrow().clone();
    if let Some(f) = listener {
        if let Err(err) = f.call1(&JsValue::NULL, &JsValue::from_f64(timestamp_ms)) {
            log::error!("frame listener threw: {:?}", err);
        }
    }
}
