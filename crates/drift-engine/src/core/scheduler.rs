use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Work to run on the next display frame, given the frame timestamp in ms.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Identifies a scheduled frame so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// Host frame source: `requestAnimationFrame` in the browser, a manual pump
/// in headless hosts.
pub trait FrameScheduler {
    fn schedule(&self, callback: FrameCallback) -> FrameHandle;
    /// Cancelling an unknown or already-run handle is a no-op.
    fn cancel(&self, handle: FrameHandle);
}

/// Something that advances once per display frame.
pub trait Animated {
    fn on_frame(&mut self, timestamp_ms: f64);
    /// Whether another frame should be requested after this one.
    fn is_running(&self) -> bool;
}

struct Shared<T, S> {
    target: RefCell<T>,
    scheduler: S,
    pending: Cell<Option<FrameHandle>>,
}

/// Drives an `Animated` target from a `FrameScheduler`.
///
/// At most one frame is pending at a time. Frames are requested only while
/// the target reports running; pausing cancels the pending request and
/// dropping the loop cancels it for good.
pub struct AnimationLoop<T: Animated + 'static, S: FrameScheduler + 'static> {
    shared: Rc<Shared<T, S>>,
}

impl<T: Animated + 'static, S: FrameScheduler + 'static> AnimationLoop<T, S> {
    /// Wrap `target`. Nothing is scheduled until `start`.
    pub fn new(target: T, scheduler: S) -> Self {
        Self {
            shared: Rc::new(Shared {
                target: RefCell::new(target),
                scheduler,
                pending: Cell::new(None),
            }),
        }
    }

    /// Request the first frame if the target is running.
    pub fn start(&self) {
        self.sync();
    }

    /// Read the target.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.target.borrow())
    }

    /// Mutate the target, then schedule or cancel frames to match its state.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.shared.target.borrow_mut());
        self.sync();
        result
    }

    /// Bring the pending frame in line with `is_running`.
    pub fn sync(&self) {
        let running = self.shared.target.borrow().is_running();
        match (running, self.shared.pending.get()) {
            (true, None) => schedule_next(&self.shared),
            (false, Some(handle)) => {
                self.shared.pending.set(None);
                self.shared.scheduler.cancel(handle);
            }
            _ => {}
        }
    }

    /// Cancel any pending frame without touching the target.
    pub fn stop(&self) {
        if let Some(handle) = self.shared.pending.take() {
            self.shared.scheduler.cancel(handle);
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.shared.pending.get().is_some()
    }
}

impl<T: Animated + 'static, S: FrameScheduler + 'static> Drop for AnimationLoop<T, S> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule_next<T: Animated + 'static, S: FrameScheduler + 'static>(shared: &Rc<Shared<T, S>>) {
    let weak: Weak<Shared<T, S>> = Rc::downgrade(shared);
    let handle = shared.scheduler.schedule(Box::new(move |timestamp_ms| {
        // Loop dropped after this frame was queued.
        let Some(shared) = weak.upgrade() else {
            return;
        };
        shared.pending.set(None);
        let running = match shared.target.try_borrow_mut() {
            Ok(mut target) => {
                target.on_frame(timestamp_ms);
                target.is_running()
            }
            Err(_) => {
                log::warn!("frame fired while the animation target was borrowed; skipping");
                true
            }
        };
        if running && shared.pending.get().is_none() {
            schedule_next(&shared);
        }
    }));
    shared.pending.set(Some(handle));
}

#[derive(Default)]
struct ManualQueue {
    next_id: u32,
    queue: Vec<(FrameHandle, FrameCallback)>,
}

/// A scheduler pumped by hand. Used by native hosts and tests.
/// Clones share one queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback queued before this call. Callbacks scheduled while
    /// running wait for the next `run_frame`. Returns how many ran.
    pub fn run_frame(&self, timestamp_ms: f64) -> usize {
        let due = std::mem::take(&mut self.inner.borrow_mut().queue);
        let ran = due.len();
        for (_, callback) in due {
            callback(timestamp_ms);
        }
        ran
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&self, callback: FrameCallback) -> FrameHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = FrameHandle(inner.next_id);
        inner.next_id = inner.next_id.wrapping_add(1);
        inner.queue.push((handle, callback));
        handle
    }

    fn cancel(&self, handle: FrameHandle) {
        self.inner.borrow_mut().queue.retain(|(h, _)| *h != handle);
    }
}
