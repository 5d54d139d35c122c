//! Axis-aligned rectangles and per-event layout measurements
//!
//! All rectangles are in viewport coordinates (CSS pixels, y down), matching
//! what `getBoundingClientRect` reports.

use glam::Vec2;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(left, top),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Convert a viewport point into this rectangle's local space
    #[inline]
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        point - self.origin
    }
}

/// Fresh measurements of the page, taken by the host for every event/frame.
///
/// Never cached between events: resizes and content changes move things.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    /// Bounding box of the area the reject control lives in
    pub container: Rect,
    /// Size of the reject control
    pub control_size: Vec2,
    /// Bounding box of the accept control
    pub accept: Rect,
    /// Window inner size
    pub viewport: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(r.center(), Vec2::new(60.0, 40.0));
    }

    #[test]
    fn test_to_local() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(r.to_local(Vec2::new(15.0, 25.0)), Vec2::new(5.0, 5.0));
    }
}
