/// Input events the host page forwards between ticks.
/// Coordinates are canvas-local pixels; the host subtracts the canvas offset
/// from touch client coordinates before pushing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began.
    PointerDown { x: f32, y: f32 },
    /// A touch/cursor moved.
    PointerMove { x: f32, y: f32 },
    /// A touch/click ended.
    PointerUp { x: f32, y: f32 },
    /// The platform cancelled the touch (e.g. a system gesture took over).
    PointerCancel,
    /// The canvas was resized to the given pixel dimensions.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Resize { width: 640.0, height: 480.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn iter_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        q.push(InputEvent::PointerMove { x: 5.0, y: 5.0 });
        q.push(InputEvent::PointerCancel);
        assert_eq!(q.iter().last(), Some(&InputEvent::PointerCancel));
        assert_eq!(q.iter().nth(1), Some(&InputEvent::PointerMove { x: 5.0, y: 5.0 }));
        assert_eq!(q.len(), 3);
    }
}
