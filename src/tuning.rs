//! Choreography tuning
//!
//! Every number that shapes how the page moves lives here. The danger radius,
//! push distance and jitter were tuned by feel and are kept configurable.
//! A page can override any subset with an inline JSON block:
//!
//! ```html
//! <script id="tuning" type="application/json">{ "evasion": { "danger_radius": 90 } }</script>
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading tuning overrides
#[derive(Error, Debug)]
pub enum TuningError {
    /// The JSON block could not be parsed
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the simulation cannot use
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Evading control parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvasionTuning {
    /// Margin kept between the control and the container edges
    pub padding: f32,
    /// Pointer distance below which the control flees
    pub danger_radius: f32,
    /// How far the control jumps away along the flee direction
    pub push_distance: f32,
    /// Full span of random jitter per axis (±jitter/2)
    pub jitter: f32,
    /// Initial target as (fraction of container width, absolute y)
    pub initial_target: Vec2,
}

impl Default for EvasionTuning {
    fn default() -> Self {
        Self {
            padding: 6.0,
            danger_radius: 115.0,
            push_distance: 150.0,
            jitter: 50.0,
            initial_target: Vec2::new(0.62, 10.0),
        }
    }
}

/// Celebration burst parameters (all motion is per frame)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstTuning {
    pub speed_min: f32,
    pub speed_max: f32,
    /// Upward "pop" subtracted from vy
    pub boost_min: f32,
    pub boost_max: f32,
    /// Velocity multiplier applied every frame
    pub step: f32,
    /// Extra downward displacement per frame of age
    pub gravity: f32,
    /// Rotation per frame (degrees)
    pub spin: f32,
    pub lifetime_min: f32,
    pub lifetime_max: f32,
    pub max_particles: usize,
    /// Particles in the burst on the accept control itself
    pub main_count: u32,
    /// Particles in each of the two follow-up bursts
    pub side_count: u32,
    /// Offset of the follow-up bursts (x mirrored for the second one)
    pub side_offset: Vec2,
    pub first_delay_ms: f64,
    pub second_delay_ms: f64,
}

impl Default for BurstTuning {
    fn default() -> Self {
        Self {
            speed_min: 2.0,
            speed_max: 8.0,
            boost_min: 2.0,
            boost_max: 5.0,
            step: 4.0,
            gravity: 0.18,
            spin: 6.0,
            lifetime_min: 120.0,
            lifetime_max: 160.0,
            max_particles: 600,
            main_count: 90,
            side_count: 55,
            side_offset: Vec2::new(120.0, 30.0),
            first_delay_ms: 160.0,
            second_delay_ms: 260.0,
        }
    }
}

/// Background heart stream parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientTuning {
    pub initial_count: u32,
    /// Upper bound of the random start delay for the initial wave
    pub initial_stagger_ms: f64,
    pub interval_ms: f64,
    pub rise_min_ms: f64,
    pub rise_max_ms: f64,
    /// Horizontal drift is uniform in [-drift, drift)
    pub drift: f32,
    /// Start offset below the viewport bottom
    pub start_offset_min: f32,
    pub start_offset_max: f32,
    /// Grace period before a finished sprite is removed
    pub removal_margin_ms: f64,
}

impl Default for AmbientTuning {
    fn default() -> Self {
        Self {
            initial_count: 18,
            initial_stagger_ms: 2200.0,
            interval_ms: 900.0,
            rise_min_ms: 6500.0,
            rise_max_ms: 13000.0,
            drift: 90.0,
            start_offset_min: 30.0,
            start_offset_max: 80.0,
            removal_margin_ms: 150.0,
        }
    }
}

/// Accept/reject flow parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTuning {
    pub scale_step: f32,
    pub max_scale_steps: u32,
    pub status_revert_ms: f64,
    pub music_hint_ms: f64,
}

impl Default for PromptTuning {
    fn default() -> Self {
        Self {
            scale_step: 0.06,
            max_scale_steps: 5,
            status_revert_ms: 1200.0,
            music_hint_ms: 2500.0,
        }
    }
}

/// All tuning sections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub evasion: EvasionTuning,
    pub burst: BurstTuning,
    pub ambient: AmbientTuning,
    pub prompt: PromptTuning,
}

impl Tuning {
    /// Id of the inline JSON block read on the web
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "tuning";

    /// Parse and validate a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break range sampling or timers
    ///
    /// Comparisons are negated so that NaN fails every check.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let e = &self.evasion;
        let b = &self.burst;
        let a = &self.ambient;
        let p = &self.prompt;

        // Infinities pass the ordering checks below but break range sampling
        let floats = [
            ("evasion.padding", f64::from(e.padding)),
            ("evasion.danger_radius", f64::from(e.danger_radius)),
            ("evasion.push_distance", f64::from(e.push_distance)),
            ("evasion.jitter", f64::from(e.jitter)),
            ("evasion.initial_target.x", f64::from(e.initial_target.x)),
            ("evasion.initial_target.y", f64::from(e.initial_target.y)),
            ("burst.speed_min", f64::from(b.speed_min)),
            ("burst.speed_max", f64::from(b.speed_max)),
            ("burst.boost_min", f64::from(b.boost_min)),
            ("burst.boost_max", f64::from(b.boost_max)),
            ("burst.step", f64::from(b.step)),
            ("burst.gravity", f64::from(b.gravity)),
            ("burst.spin", f64::from(b.spin)),
            ("burst.lifetime_min", f64::from(b.lifetime_min)),
            ("burst.lifetime_max", f64::from(b.lifetime_max)),
            ("burst.side_offset.x", f64::from(b.side_offset.x)),
            ("burst.side_offset.y", f64::from(b.side_offset.y)),
            ("burst.first_delay_ms", b.first_delay_ms),
            ("burst.second_delay_ms", b.second_delay_ms),
            ("ambient.initial_stagger_ms", a.initial_stagger_ms),
            ("ambient.interval_ms", a.interval_ms),
            ("ambient.rise_min_ms", a.rise_min_ms),
            ("ambient.rise_max_ms", a.rise_max_ms),
            ("ambient.drift", f64::from(a.drift)),
            ("ambient.start_offset_min", f64::from(a.start_offset_min)),
            ("ambient.start_offset_max", f64::from(a.start_offset_max)),
            ("ambient.removal_margin_ms", a.removal_margin_ms),
            ("prompt.scale_step", f64::from(p.scale_step)),
            ("prompt.status_revert_ms", p.status_revert_ms),
            ("prompt.music_hint_ms", p.music_hint_ms),
        ];
        if let Some(&(field, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(field, "must be finite");
        }

        if !(e.padding >= 0.0) {
            return invalid("evasion.padding", "must be non-negative");
        }
        if !(e.danger_radius > 0.0) {
            return invalid("evasion.danger_radius", "must be positive");
        }
        if !(e.jitter >= 0.0) {
            return invalid("evasion.jitter", "must be non-negative");
        }

        if !(b.speed_min <= b.speed_max) {
            return invalid("burst.speed_min", "must not exceed speed_max");
        }
        if !(b.boost_min <= b.boost_max) {
            return invalid("burst.boost_min", "must not exceed boost_max");
        }
        if !(b.lifetime_min >= 1.0 && b.lifetime_min <= b.lifetime_max) {
            return invalid("burst.lifetime_min", "must be at least 1 and not exceed lifetime_max");
        }

        if !(a.interval_ms > 0.0) {
            return invalid("ambient.interval_ms", "must be positive");
        }
        if !(a.rise_min_ms <= a.rise_max_ms) {
            return invalid("ambient.rise_min_ms", "must not exceed rise_max_ms");
        }
        if !(a.start_offset_min <= a.start_offset_max) {
            return invalid("ambient.start_offset_min", "must not exceed start_offset_max");
        }
        if !(a.initial_stagger_ms >= 0.0 && a.drift >= 0.0) {
            return invalid("ambient.initial_stagger_ms", "stagger and drift must be non-negative");
        }

        Ok(())
    }

    /// Load overrides from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = text else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides from #{}", Self::ELEMENT_ID);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let tuning = Tuning::from_json(r#"{ "evasion": { "danger_radius": 90 } }"#).unwrap();
        assert_eq!(tuning.evasion.danger_radius, 90.0);
        assert_eq!(tuning.evasion.push_distance, 150.0);
        assert_eq!(tuning.ambient.initial_count, 18);
    }

    #[test]
    fn test_empty_object_is_default() {
        let tuning = Tuning::from_json("{}").unwrap();
        assert_eq!(tuning.burst.lifetime_max, 160.0);
        assert_eq!(tuning.prompt.max_scale_steps, 5);
    }

    #[test]
    fn test_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_inverted_lifetime_rejected() {
        let err = Tuning::from_json(r#"{ "burst": { "lifetime_min": 200 } }"#).unwrap_err();
        match err {
            TuningError::Invalid { field, .. } => assert_eq!(field, "burst.lifetime_min"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = Tuning::from_json(r#"{ "ambient": { "interval_ms": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("ambient.interval_ms"));
    }

    #[test]
    fn test_infinite_jitter_rejected() {
        // 1e39 overflows f32 to infinity
        let err = Tuning::from_json(r#"{ "evasion": { "jitter": 1e39 } }"#).unwrap_err();
        match err {
            TuningError::Invalid { field, .. } => assert_eq!(field, "evasion.jitter"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_infinite_upper_bounds_rejected() {
        for json in [
            r#"{ "burst": { "speed_max": 1e39 } }"#,
            r#"{ "burst": { "boost_max": 1e39 } }"#,
            r#"{ "ambient": { "drift": 1e39 } }"#,
            r#"{ "ambient": { "start_offset_max": 1e39 } }"#,
            r#"{ "evasion": { "push_distance": -1e39 } }"#,
        ] {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(err.to_string().contains("must be finite"), "{json}: {err}");
        }
    }
}
