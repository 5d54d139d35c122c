//! Celebration burst particles
//!
//! Every particle is a plain value in the field's collection. The host calls
//! [`ParticleField::step`] once per rendered frame; motion is measured in
//! frames, not wall-clock time.

use glam::Vec2;
use rand::Rng;

use super::{pick_glyph, sample_range};
use crate::polar_to_cartesian;
use crate::tuning::BurstTuning;

/// A single heart flying out of a burst
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: u32,
    pub glyph: &'static str,
    /// Viewport position
    pub pos: Vec2,
    /// Per-frame velocity before the step multiplier
    pub vel: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Frames lived so far
    pub age: u32,
    /// Frame count at which the particle disappears
    pub max_age: f32,
}

impl Particle {
    /// Linear fade from 1 at birth to 0 at `max_age`
    pub fn opacity(&self) -> f32 {
        (1.0 - self.age as f32 / self.max_age).max(0.0)
    }

    pub fn is_alive(&self) -> bool {
        (self.age as f32) < self.max_age
    }

    /// Advance one frame. Returns false once the lifetime is used up.
    pub fn step(&mut self, params: &BurstTuning) -> bool {
        self.age += 1;
        self.pos.x += self.vel.x * params.step;
        // Gravity grows with age for an accelerating fall
        self.pos.y += self.vel.y * params.step + self.age as f32 * params.gravity;
        self.rotation += params.spin;
        self.is_alive()
    }
}

/// All live burst particles
#[derive(Debug, Clone)]
pub struct ParticleField {
    /// Live particles, oldest first
    particles: Vec<Particle>,
    /// Ids removed since the last [`take_despawned`](Self::take_despawned)
    despawned: Vec<u32>,
    next_id: u32,
    params: BurstTuning,
}

impl ParticleField {
    pub fn new(params: BurstTuning) -> Self {
        Self {
            particles: Vec::new(),
            despawned: Vec::new(),
            next_id: 1,
            params,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Spawn `count` particles at `center` (viewport coordinates)
    pub fn burst(&mut self, center: Vec2, count: u32, rng: &mut impl Rng) {
        let p = &self.params;
        log::debug!("Burst of {} at ({:.0}, {:.0})", count, center.x, center.y);

        for _ in 0..count {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = sample_range(rng, p.speed_min, p.speed_max);
            let mut vel = polar_to_cartesian(speed, angle);
            vel.y -= sample_range(rng, p.boost_min, p.boost_max);

            let particle = Particle {
                id: self.next_id,
                glyph: pick_glyph(rng),
                pos: center,
                vel,
                rotation: rng.random_range(0.0..360.0),
                age: 0,
                max_age: sample_range(rng, p.lifetime_min, p.lifetime_max),
            };
            self.next_id = self.next_id.wrapping_add(1);

            if self.particles.len() >= p.max_particles {
                // Remove oldest particles to make room
                if self.particles.is_empty() {
                    continue;
                }
                let oldest = self.particles.remove(0);
                self.despawned.push(oldest.id);
            }
            self.particles.push(particle);
        }
    }

    /// Advance every particle by one frame and drop the expired ones
    pub fn step(&mut self) {
        let params = &self.params;
        let despawned = &mut self.despawned;
        self.particles.retain_mut(|particle| {
            let alive = particle.step(params);
            if !alive {
                despawned.push(particle.id);
            }
            alive
        });
    }

    /// Ids removed since the last call, for the renderer to drop
    pub fn take_despawned(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.despawned)
    }
}
