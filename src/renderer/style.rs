//! Inline style values for sprites and controls
//!
//! Pure string formatting so it can be tested without a DOM.

use crate::sim::{AmbientSprite, Particle};

/// CSS pixel length
#[inline]
pub fn px(v: f32) -> String {
    format!("{:.2}px", v)
}

/// CSS millisecond duration
#[inline]
pub fn ms(v: f64) -> String {
    format!("{:.0}ms", v)
}

/// Transform for a burst particle at its current position and spin
pub fn particle_transform(p: &Particle) -> String {
    format!(
        "translate({:.2}px, {:.2}px) rotate({:.1}deg)",
        p.pos.x, p.pos.y, p.rotation
    )
}

pub fn particle_opacity(p: &Particle) -> String {
    format!("{:.3}", p.opacity())
}

/// Transform for the growing accept control
pub fn scale_transform(scale: f32) -> String {
    format!("scale({:.2})", scale)
}

/// Inline properties for a background heart.
///
/// `--dx` feeds the drift of the `rise` keyframes in the page stylesheet.
pub fn ambient_properties(s: &AmbientSprite) -> [(&'static str, String); 5] {
    [
        ("left", px(s.x)),
        ("bottom", px(s.bottom)),
        ("--dx", px(s.drift)),
        ("animation-duration", ms(s.duration_ms)),
        ("animation-delay", ms(s.delay_ms)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn particle() -> Particle {
        Particle {
            id: 7,
            glyph: "💖",
            pos: Vec2::new(12.5, -3.25),
            vel: Vec2::ZERO,
            rotation: 42.0,
            age: 30,
            max_age: 120.0,
        }
    }

    #[test]
    fn test_particle_transform() {
        assert_eq!(
            particle_transform(&particle()),
            "translate(12.50px, -3.25px) rotate(42.0deg)"
        );
    }

    #[test]
    fn test_particle_opacity() {
        assert_eq!(particle_opacity(&particle()), "0.750");
    }

    #[test]
    fn test_scale_transform() {
        assert_eq!(scale_transform(1.12), "scale(1.12)");
        assert_eq!(scale_transform(1.0), "scale(1.00)");
    }

    #[test]
    fn test_ambient_properties() {
        let sprite = AmbientSprite {
            id: 1,
            glyph: "💕",
            x: 640.0,
            bottom: -42.5,
            drift: -12.0,
            duration_ms: 7000.4,
            delay_ms: 1234.6,
            spawned_at_ms: 0.0,
        };
        let props = ambient_properties(&sprite);
        assert_eq!(props[0], ("left", "640.00px".to_string()));
        assert_eq!(props[1], ("bottom", "-42.50px".to_string()));
        assert_eq!(props[2], ("--dx", "-12.00px".to_string()));
        assert_eq!(props[3], ("animation-duration", "7000ms".to_string()));
        assert_eq!(props[4], ("animation-delay", "1235ms".to_string()));
    }
}
