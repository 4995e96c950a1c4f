/// Host events the background understands.
/// Events are queued as they arrive and only applied at the start of the
/// next frame, never in the middle of one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to container-local coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// Pointer left the container.
    PointerLeave,
    /// Container was measured at a new size.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// The host writes events as they happen; the background drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order and clear the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
