/// Input event types the simulation understands.
/// Pointer coordinates are viewport pixels, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A button was pressed at (x, y). Button 0 is primary.
    PointerDown { button: u32, x: f32, y: f32 },
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A button was released at (x, y).
    PointerUp { x: f32, y: f32 },
    /// Wheel scroll. Positive `delta_y` zooms out.
    Scroll { delta_y: f32 },
    /// A click (press and release without drag) at (x, y); used for picking.
    Click { x: f32, y: f32 },
    /// The viewport was resized.
    Resize { width: f32, height: f32 },
    /// The time-speed control changed.
    SetTimeSpeed { speed: f64 },
    /// The object selector changed. Empty means "no selection".
    SelectObject { name: String },
}

/// A queue of input events.
/// Host callbacks push events; the simulation drains them once per frame.
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

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { button: 0, x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerMove { x: 15.0, y: 20.0 });
        q.push(InputEvent::SelectObject { name: "Mars".into() });
        assert_eq!(q.len(), 3);

        let events = q.drain();
        assert!(q.is_empty());
        assert_eq!(events[0], InputEvent::PointerDown { button: 0, x: 10.0, y: 20.0 });
        assert_eq!(events[2], InputEvent::SelectObject { name: "Mars".into() });
    }

    #[test]
    fn iter_does_not_consume() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Scroll { delta_y: -120.0 });
        assert_eq!(q.iter().count(), 1);
        assert_eq!(q.len(), 1);
    }
}
