//! Abstract input events
//!
//! The browser layer translates DOM events into these; the simulation never
//! sees a DOM type.

use glam::Vec2;

/// One input event. Pointer coordinates are viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Page finished loading
    Load,
    /// Mouse moved over the container
    PointerMove(Vec2),
    /// First contact point of a touchstart, `None` if the list was empty
    TouchStart(Option<Vec2>),
    /// First contact point of a touchmove, `None` if the list was empty
    TouchMove(Option<Vec2>),
    /// The reject control itself was clicked
    RejectClick,
    /// The accept control was clicked
    AcceptClick,
    /// Window resized
    Resize,
}

impl InputEvent {
    /// Pointer position this event asks the control to flee from, if any
    pub fn pointer(&self) -> Option<Vec2> {
        match *self {
            InputEvent::PointerMove(p) => Some(p),
            InputEvent::TouchStart(p) | InputEvent::TouchMove(p) => p,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_extraction() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(InputEvent::PointerMove(p).pointer(), Some(p));
        assert_eq!(InputEvent::TouchStart(Some(p)).pointer(), Some(p));
        assert_eq!(InputEvent::TouchMove(None).pointer(), None);
        assert_eq!(InputEvent::RejectClick.pointer(), None);
    }
}
