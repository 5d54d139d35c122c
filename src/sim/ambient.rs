//! Ambient background hearts
//!
//! The rise itself is a CSS animation; the simulation only decides when a
//! sprite is born, what its animation parameters are, and when its element
//! must be removed. Everything runs on the host's millisecond clock, which is
//! independent of the frame counter that drives burst particles.

use rand::Rng;

use super::{pick_glyph, sample_ms, sample_range};
use crate::tuning::AmbientTuning;

/// One rising background heart
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientSprite {
    pub id: u32,
    pub glyph: &'static str,
    /// Horizontal start (CSS `left`)
    pub x: f32,
    /// Start offset below the viewport (CSS `bottom`, negative)
    pub bottom: f32,
    /// Horizontal drift over the whole rise
    pub drift: f32,
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub spawned_at_ms: f64,
}

impl AmbientSprite {
    /// Clock time at which the element should be removed
    pub fn expires_at_ms(&self, margin_ms: f64) -> f64 {
        self.spawned_at_ms + self.duration_ms + self.delay_ms + margin_ms
    }
}

/// Scheduling state for the stream
#[derive(Debug, Clone, Copy, PartialEq)]
enum StreamPhase {
    Idle,
    Running { next_spawn_ms: f64 },
}

/// Page-lifetime stream of background hearts
#[derive(Debug, Clone)]
pub struct AmbientStream {
    sprites: Vec<AmbientSprite>,
    /// Ids spawned since the last [`take_spawned`](Self::take_spawned)
    spawned: Vec<u32>,
    /// Ids removed since the last [`take_despawned`](Self::take_despawned)
    despawned: Vec<u32>,
    phase: StreamPhase,
    spawned_total: u64,
    next_id: u32,
    params: AmbientTuning,
}

impl AmbientStream {
    pub fn new(params: AmbientTuning) -> Self {
        Self {
            sprites: Vec::new(),
            spawned: Vec::new(),
            despawned: Vec::new(),
            phase: StreamPhase::Idle,
            spawned_total: 0,
            next_id: 1,
            params,
        }
    }

    pub fn sprites(&self) -> &[AmbientSprite] {
        &self.sprites
    }

    pub fn sprite(&self, id: u32) -> Option<&AmbientSprite> {
        self.sprites.iter().find(|s| s.id == id)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, StreamPhase::Running { .. })
    }

    /// Number of sprites spawned since activation
    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    /// Activate the stream: an initial wave with staggered delays, then one
    /// sprite per interval. Calling it again has no effect.
    pub fn start(&mut self, now_ms: f64, viewport_width: f32, rng: &mut impl Rng) {
        if self.is_running() {
            return;
        }

        for _ in 0..self.params.initial_count {
            self.spawn(now_ms, viewport_width, true, rng);
        }
        self.phase = StreamPhase::Running {
            next_spawn_ms: now_ms + self.params.interval_ms,
        };
        log::info!("Ambient stream started with {} hearts", self.params.initial_count);
    }

    /// Advance the stream clock: spawn if an interval elapsed, expire
    /// finished sprites.
    ///
    /// A stalled clock does not replay missed intervals; at most one sprite
    /// spawns per call and the schedule re-anchors to `now_ms`.
    pub fn advance(&mut self, now_ms: f64, viewport_width: f32, rng: &mut impl Rng) {
        if let StreamPhase::Running { next_spawn_ms } = self.phase {
            if now_ms >= next_spawn_ms {
                self.spawn(now_ms, viewport_width, false, rng);
                let mut next = next_spawn_ms + self.params.interval_ms;
                if next <= now_ms {
                    next = now_ms + self.params.interval_ms;
                }
                self.phase = StreamPhase::Running { next_spawn_ms: next };
            }
        }

        let margin = self.params.removal_margin_ms;
        let despawned = &mut self.despawned;
        self.sprites.retain(|sprite| {
            let alive = now_ms < sprite.expires_at_ms(margin);
            if !alive {
                despawned.push(sprite.id);
            }
            alive
        });
    }

    fn spawn(&mut self, now_ms: f64, viewport_width: f32, initial: bool, rng: &mut impl Rng) {
        let p = &self.params;
        let sprite = AmbientSprite {
            id: self.next_id,
            glyph: pick_glyph(rng),
            x: sample_range(rng, 0.0, viewport_width),
            bottom: -sample_range(rng, p.start_offset_min, p.start_offset_max),
            drift: sample_range(rng, -p.drift, p.drift),
            duration_ms: sample_ms(rng, p.rise_min_ms, p.rise_max_ms),
            delay_ms: if initial {
                sample_ms(rng, 0.0, p.initial_stagger_ms)
            } else {
                0.0
            },
            spawned_at_ms: now_ms,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.spawned_total += 1;
        self.spawned.push(sprite.id);
        self.sprites.push(sprite);
    }

    /// Ids born since the last call, for the renderer to create
    pub fn take_spawned(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.spawned)
    }

    /// Ids removed since the last call, for the renderer to drop
    pub fn take_despawned(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.despawned)
    }
}
