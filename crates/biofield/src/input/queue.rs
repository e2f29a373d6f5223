/// Raw host events the backdrop understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The cursor moved to viewport coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// The cursor left the page.
    PointerLeave,
    /// The page scrolled to a vertical offset in pixels.
    Scroll { offset: f32 },
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
    /// The activation signal (page theme) changed. `None` = attribute absent.
    ThemeChanged(Option<String>),
}

/// A queue of input events.
/// The host pushes events between frames; the backdrop drains them at the
/// start of the next tick so state is never touched mid-draw.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
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
