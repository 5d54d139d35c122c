//! Accept/reject flow
//!
//! Thin orchestration on top of the evasion controller and the particle
//! field: counts rejections, scales the accept control, flashes status
//! lines and schedules the celebration bursts.

use glam::Vec2;

use crate::consts::{HINT_ACCEPTED, HINT_DEFAULT, HINT_REJECTED};
use crate::tuning::{BurstTuning, PromptTuning};

/// Where the prompt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Choice {
    /// Still waiting for "Yes"
    #[default]
    Pending,
    /// "Yes" was clicked at least once
    Accepted,
}

/// A burst waiting for its start time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledBurst {
    pub due_ms: f64,
    /// Viewport coordinates
    pub center: Vec2,
    pub count: u32,
}

/// Status line with an optional timed revert
#[derive(Debug, Clone, PartialEq)]
struct Status {
    text: &'static str,
    /// Text to restore and when
    revert: Option<(f64, &'static str)>,
}

/// Prompt state for one page session
#[derive(Debug, Clone)]
pub struct Prompt {
    rejections: u32,
    choice: Choice,
    status: Status,
    pending: Vec<ScheduledBurst>,
    params: PromptTuning,
    bursts: BurstTuning,
}

impl Prompt {
    pub fn new(params: PromptTuning, bursts: BurstTuning) -> Self {
        Self {
            rejections: 0,
            choice: Choice::Pending,
            status: Status {
                text: HINT_DEFAULT,
                revert: None,
            },
            pending: Vec::new(),
            params,
            bursts,
        }
    }

    pub fn rejections(&self) -> u32 {
        self.rejections
    }

    pub fn choice(&self) -> Choice {
        self.choice
    }

    pub fn status(&self) -> &'static str {
        self.status.text
    }

    /// Scale of the accept control, growing with each rejection up to a cap
    pub fn accept_scale(&self) -> f32 {
        let steps = self.rejections.min(self.params.max_scale_steps);
        1.0 + steps as f32 * self.params.scale_step
    }

    /// Register a rejection. Returns false (and does nothing) once accepted.
    pub fn reject(&mut self, now_ms: f64) -> bool {
        if self.choice == Choice::Accepted {
            return false;
        }
        self.rejections = self.rejections.saturating_add(1);
        self.flash(HINT_REJECTED, now_ms, self.params.status_revert_ms);
        log::info!("Rejection #{}", self.rejections);
        true
    }

    /// Accept. Returns the immediate burst; the two follow-ups are queued.
    pub fn accept(&mut self, now_ms: f64, accept_center: Vec2) -> ScheduledBurst {
        if self.choice == Choice::Pending {
            log::info!("Accepted after {} rejections", self.rejections);
        }
        self.choice = Choice::Accepted;
        self.status = Status {
            text: HINT_ACCEPTED,
            revert: None,
        };

        let b = &self.bursts;
        let left = Vec2::new(-b.side_offset.x, b.side_offset.y);
        self.pending.push(ScheduledBurst {
            due_ms: now_ms + b.first_delay_ms,
            center: accept_center + b.side_offset,
            count: b.side_count,
        });
        self.pending.push(ScheduledBurst {
            due_ms: now_ms + b.second_delay_ms,
            center: accept_center + left,
            count: b.side_count,
        });

        ScheduledBurst {
            due_ms: now_ms,
            center: accept_center,
            count: b.main_count,
        }
    }

    /// Show `text` for `duration_ms`, then fall back to whatever is showing
    /// now (or the default tip if that was itself a flash)
    pub fn flash(&mut self, text: &'static str, now_ms: f64, duration_ms: f64) {
        let restore = match self.status.revert {
            Some((_, restore)) => restore,
            None => self.status.text,
        };
        self.status = Status {
            text,
            revert: Some((now_ms + duration_ms, restore)),
        };
    }

    /// Advance timers. Returns bursts that became due, in due order, and
    /// whether the status text changed.
    pub fn advance(&mut self, now_ms: f64) -> (Vec<ScheduledBurst>, bool) {
        let mut status_changed = false;
        if let Some((at, restore)) = self.status.revert {
            if now_ms >= at {
                self.status = Status {
                    text: restore,
                    revert: None,
                };
                status_changed = true;
            }
        }

        let mut due: Vec<ScheduledBurst> = Vec::new();
        self.pending.retain(|burst| {
            if now_ms >= burst.due_ms {
                due.push(*burst);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));

        (due, status_changed)
    }
}
