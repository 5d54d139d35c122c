//! Evading "No" control
//!
//! The control lives inside a container and keeps out of the pointer's way.
//! Its position is stored relative to the container's top-left corner and is
//! the single source of truth; the host only mirrors it into `left`/`top`.

use glam::Vec2;
use rand::Rng;

use super::rect::Layout;
use super::sample_range;
use crate::clamp_lenient;
use crate::tuning::EvasionTuning;

/// Legal placement range for the control inside its container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl PlacementBounds {
    /// `[padding, container - control - padding]` on each axis.
    ///
    /// If the container is too small the range is inverted; every sampling
    /// and clamping path then resolves to `min`.
    pub fn new(layout: &Layout, padding: f32) -> Self {
        Self {
            min: Vec2::splat(padding),
            max: layout.container.size - layout.control_size - Vec2::splat(padding),
        }
    }

    /// Clamp a point into the legal range
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            clamp_lenient(p.x, self.min.x, self.max.x),
            clamp_lenient(p.y, self.min.y, self.max.y),
        )
    }

    /// Check whether a point is legal (inverted ranges accept only `min`)
    pub fn contains(&self, p: Vec2) -> bool {
        self.clamp(p) == p
    }
}

/// The control that runs away
#[derive(Debug, Clone)]
pub struct EvasionController {
    /// Current top-left position, container-relative
    pub position: Vec2,
    params: EvasionTuning,
}

impl EvasionController {
    pub fn new(params: EvasionTuning) -> Self {
        Self {
            position: Vec2::splat(params.padding),
            params,
        }
    }

    pub fn bounds(&self, layout: &Layout) -> PlacementBounds {
        PlacementBounds::new(layout, self.params.padding)
    }

    /// Control center, container-relative
    pub fn center(&self, layout: &Layout) -> Vec2 {
        self.position + layout.control_size * 0.5
    }

    /// Place the control.
    ///
    /// Each axis with a target is clamped into the legal range; each axis
    /// without one gets a uniformly random legal coordinate.
    pub fn place(
        &mut self,
        target_x: Option<f32>,
        target_y: Option<f32>,
        layout: &Layout,
        rng: &mut impl Rng,
    ) -> Vec2 {
        let bounds = self.bounds(layout);
        let x = match target_x {
            Some(x) => clamp_lenient(x, bounds.min.x, bounds.max.x),
            None => sample_range(rng, bounds.min.x, bounds.max.x),
        };
        let y = match target_y {
            Some(y) => clamp_lenient(y, bounds.min.y, bounds.max.y),
            None => sample_range(rng, bounds.min.y, bounds.max.y),
        };
        self.position = Vec2::new(x, y);
        self.position
    }

    /// Fresh random position anywhere legal
    pub fn place_random(&mut self, layout: &Layout, rng: &mut impl Rng) -> Vec2 {
        self.place(None, None, layout, rng)
    }

    /// Initial placement: a fraction of the container width, fixed y
    pub fn place_initial(&mut self, layout: &Layout, rng: &mut impl Rng) -> Vec2 {
        let target = self.params.initial_target;
        self.place(
            Some(layout.container.width() * target.x),
            Some(target.y),
            layout,
            rng,
        )
    }

    /// Flee from a pointer given in viewport coordinates.
    ///
    /// Returns the new position, or `None` when the pointer is outside the
    /// danger radius (in which case nothing changes).
    pub fn repel_from(&mut self, pointer: Vec2, layout: &Layout, rng: &mut impl Rng) -> Option<Vec2> {
        let pointer = layout.container.to_local(pointer);
        let delta = self.center(layout) - pointer;

        // Pointer dead on the center: treat as unit distance
        let dist = delta.length();
        let dist = if dist > 0.0 { dist } else { 1.0 };

        if dist >= self.params.danger_radius {
            return None;
        }

        let dir = delta / dist;
        let half = self.params.jitter / 2.0;
        let jitter = Vec2::new(
            sample_range(rng, -half, half),
            sample_range(rng, -half, half),
        );
        let target = self.position + dir * self.params.push_distance + jitter;

        let placed = self.place(Some(target.x), Some(target.y), layout, rng);
        log::debug!("Evaded pointer at distance {:.1} -> ({:.1}, {:.1})", dist, placed.x, placed.y);
        Some(placed)
    }
}
