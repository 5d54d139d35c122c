//! No Escape - a yes/no prompt whose "No" button runs away
//!
//! Core modules:
//! - `sim`: Deterministic simulation (evasion, particles, ambient stream, prompt flow)
//! - `renderer`: DOM sprite rendering
//! - `platform`: Browser abstraction (element lookup, input events, timing)
//! - `tuning`: Data-driven choreography constants
//! - `audio`: Background music with autoplay fallback

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Page content constants
pub mod consts {
    /// Glyphs used for burst particles and background hearts
    pub const HEARTS: [&str; 10] = [
        "💖", "💘", "💝", "💗", "💓", "💕", "💞", "❤️", "🩷", "😍",
    ];

    /// Status line shown while nothing has happened yet
    pub const HINT_DEFAULT: &str = "Tip: try clicking “No” 😈";
    /// Status line flashed after the reject control was caught
    pub const HINT_REJECTED: &str = "Nice try 😏";
    /// Status line after accepting
    pub const HINT_ACCEPTED: &str = "You’re stuck with me 😌💞";
    /// Status line flashed when the browser blocks music autoplay
    pub const HINT_MUSIC_BLOCKED: &str = "Tap 🎵 to play music";
}

/// Clamp that tolerates an inverted range, where the lower bound wins.
///
/// `f32::clamp` panics when `min > max`, which happens whenever the
/// container is narrower than the control plus padding.
#[inline]
pub fn clamp_lenient(n: f32, min: f32, max: f32) -> f32 {
    n.min(max).max(min)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_lenient_normal_range() {
        assert_eq!(clamp_lenient(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_lenient(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_lenient(42.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_lenient_inverted_range() {
        // Lower bound wins, no panic
        assert_eq!(clamp_lenient(5.0, 6.0, -4.0), 6.0);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let v = polar_to_cartesian(2.0, std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 2.0).abs() < 1e-6);
    }
}
