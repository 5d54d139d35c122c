//! Deterministic simulation module
//!
//! All choreography logic lives here. This module must be pure and deterministic:
//! - Particle motion advances one step per rendered frame
//! - Timers read a millisecond clock supplied by the host
//! - Seeded RNG only
//! - No DOM or platform dependencies

pub mod ambient;
pub mod evasion;
pub mod input;
pub mod page;
pub mod particles;
pub mod prompt;
pub mod rect;

pub use ambient::{AmbientSprite, AmbientStream};
pub use evasion::{EvasionController, PlacementBounds};
pub use input::InputEvent;
pub use page::{PageEvent, PageState};
pub use particles::{Particle, ParticleField};
pub use prompt::{Choice, Prompt, ScheduledBurst};
pub use rect::{Layout, Rect};

use rand::Rng;

use crate::consts::HEARTS;

/// Uniform sample in `[min, max)`, or `min` when the range is empty
pub(crate) fn sample_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min { rng.random_range(min..max) } else { min }
}

/// Millisecond variant of [`sample_range`]
pub(crate) fn sample_ms<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min { rng.random_range(min..max) } else { min }
}

pub(crate) fn pick_glyph<R: Rng>(rng: &mut R) -> &'static str {
    HEARTS[rng.random_range(0..HEARTS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_sample_range_empty() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(sample_range(&mut rng, 5.0, 5.0), 5.0);
        assert_eq!(sample_range(&mut rng, 5.0, -5.0), 5.0);
        assert_eq!(sample_ms(&mut rng, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_sample_range_half_open() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..1000 {
            let v = sample_range(&mut rng, -25.0, 25.0);
            assert!((-25.0..25.0).contains(&v));
        }
    }

    #[test]
    fn test_pick_glyph_from_set() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            assert!(HEARTS.contains(&pick_glyph(&mut rng)));
        }
    }
}
