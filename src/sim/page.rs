//! Page session state
//!
//! One `PageState` is built per page load. It owns the RNG and every piece of
//! choreography, consumes abstract input events plus a host clock, and queues
//! [`PageEvent`]s for the host to mirror into the DOM.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ambient::AmbientStream;
use super::evasion::EvasionController;
use super::input::InputEvent;
use super::particles::ParticleField;
use super::prompt::{Choice, Prompt, ScheduledBurst};
use super::rect::Layout;
use crate::tuning::Tuning;

/// Changes the host has to apply to the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// Reject control moved to this container-relative position
    ControlMoved(Vec2),
    /// Accept control scale changed
    AcceptScaled(f32),
    /// Status line text changed
    StatusChanged(&'static str),
    /// Hide the reject control, reveal the result panel
    Accepted,
}

/// Complete state for one page session
#[derive(Debug, Clone)]
pub struct PageState {
    /// Seed for reproducibility
    seed: u64,
    rng: Pcg32,
    pub evasion: EvasionController,
    pub particles: ParticleField,
    pub ambient: AmbientStream,
    pub prompt: Prompt,
    /// Rendered frames so far
    frames: u64,
    /// Last clock value seen, in ms
    now_ms: f64,
    loaded: bool,
    events: Vec<PageEvent>,
}

impl PageState {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            evasion: EvasionController::new(tuning.evasion.clone()),
            particles: ParticleField::new(tuning.burst.clone()),
            ambient: AmbientStream::new(tuning.ambient.clone()),
            prompt: Prompt::new(tuning.prompt.clone(), tuning.burst.clone()),
            frames: 0,
            now_ms: 0.0,
            loaded: false,
            events: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_accepted(&self) -> bool {
        self.prompt.choice() == Choice::Accepted
    }

    /// Apply one input event against fresh layout measurements
    pub fn handle(&mut self, event: InputEvent, layout: &Layout, now_ms: f64) {
        self.now_ms = self.now_ms.max(now_ms);
        let now_ms = self.now_ms;

        match event {
            InputEvent::Load => {
                if self.loaded {
                    return;
                }
                self.loaded = true;
                let pos = self.evasion.place_initial(layout, &mut self.rng);
                self.events.push(PageEvent::ControlMoved(pos));
                self.ambient.start(now_ms, layout.viewport.x, &mut self.rng);
            }
            InputEvent::PointerMove(_) | InputEvent::TouchStart(_) | InputEvent::TouchMove(_) => {
                // Touch events without a contact point carry no pointer
                let Some(pointer) = event.pointer() else { return };
                if self.is_accepted() {
                    return;
                }
                if let Some(pos) = self.evasion.repel_from(pointer, layout, &mut self.rng) {
                    self.events.push(PageEvent::ControlMoved(pos));
                }
            }
            InputEvent::RejectClick => {
                if !self.prompt.reject(now_ms) {
                    return;
                }
                let pos = self.evasion.place_random(layout, &mut self.rng);
                self.events.push(PageEvent::ControlMoved(pos));
                self.events.push(PageEvent::AcceptScaled(self.prompt.accept_scale()));
                self.events.push(PageEvent::StatusChanged(self.prompt.status()));
            }
            InputEvent::AcceptClick => {
                let burst = self.prompt.accept(now_ms, layout.accept.center());
                self.fire(burst);
                self.events.push(PageEvent::Accepted);
                self.events.push(PageEvent::StatusChanged(self.prompt.status()));
            }
            InputEvent::Resize => {
                if self.is_accepted() {
                    return;
                }
                let pos = self.evasion.place_random(layout, &mut self.rng);
                self.events.push(PageEvent::ControlMoved(pos));
            }
        }
    }

    /// One rendered frame: step particles once, then run clock-driven timers.
    ///
    /// Bursts released by a timer appear at their origin this frame and start
    /// moving on the next one, like a burst fired from an input event.
    pub fn frame(&mut self, now_ms: f64, viewport_width: f32) {
        self.particles.step();
        self.frames += 1;
        self.advance_clock(now_ms, viewport_width);
    }

    /// Run clock-driven timers without stepping particles
    pub fn advance_clock(&mut self, now_ms: f64, viewport_width: f32) {
        self.now_ms = self.now_ms.max(now_ms);
        let now_ms = self.now_ms;

        let (due, status_changed) = self.prompt.advance(now_ms);
        for burst in due {
            self.fire(burst);
        }
        if status_changed {
            self.events.push(PageEvent::StatusChanged(self.prompt.status()));
        }

        self.ambient.advance(now_ms, viewport_width, &mut self.rng);
    }

    /// Temporarily replace the status line
    pub fn flash_status(&mut self, text: &'static str, now_ms: f64, duration_ms: f64) {
        self.prompt.flash(text, now_ms, duration_ms);
        self.events.push(PageEvent::StatusChanged(self.prompt.status()));
    }

    fn fire(&mut self, burst: ScheduledBurst) {
        self.particles.burst(burst.center, burst.count, &mut self.rng);
    }

    /// Drain queued page events
    pub fn take_events(&mut self) -> Vec<PageEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{HINT_ACCEPTED, HINT_DEFAULT, HINT_REJECTED};
    use crate::sim::rect::Rect;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn layout() -> Layout {
        Layout {
            container: Rect::new(200.0, 300.0, 500.0, 120.0),
            control_size: Vec2::new(90.0, 44.0),
            accept: Rect::new(220.0, 320.0, 100.0, 44.0),
            viewport: Vec2::new(1280.0, 800.0),
        }
    }

    fn loaded_page(seed: u64) -> PageState {
        let mut page = PageState::new(seed, &Tuning::default());
        page.handle(InputEvent::Load, &layout(), 0.0);
        page.take_events();
        page
    }

    #[test]
    fn test_load_places_control_and_starts_stream() {
        let mut page = PageState::new(1, &Tuning::default());
        page.handle(InputEvent::Load, &layout(), 0.0);

        let events = page.take_events();
        assert_eq!(events.len(), 1);
        match events[0] {
            PageEvent::ControlMoved(pos) => {
                assert!((pos.x - 310.0).abs() < 1e-3);
                assert_eq!(pos.y, 10.0);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(page.ambient.spawned_total(), 18);

        // A second load is ignored
        page.handle(InputEvent::Load, &layout(), 5.0);
        assert!(page.take_events().is_empty());
        assert_eq!(page.ambient.spawned_total(), 18);
    }

    #[test]
    fn test_ambient_one_more_after_interval_without_input() {
        let mut page = loaded_page(2);
        let mut t = 0.0;
        while t < 900.0 {
            t += FRAME_MS;
            page.frame(t.min(900.0), 1280.0);
        }
        assert_eq!(page.ambient.spawned_total(), 19);
        assert_eq!(page.ambient.sprites().len(), 19);
    }

    #[test]
    fn test_pointer_far_away_is_ignored() {
        let mut page = loaded_page(3);
        let before = page.evasion.position;
        page.handle(InputEvent::PointerMove(Vec2::new(0.0, 0.0)), &layout(), 10.0);
        assert!(page.take_events().is_empty());
        assert_eq!(page.evasion.position, before);
    }

    #[test]
    fn test_pointer_close_moves_control() {
        let mut page = loaded_page(4);
        let l = layout();
        let center = l.container.origin + page.evasion.center(&l);
        page.handle(InputEvent::PointerMove(center + Vec2::new(20.0, 0.0)), &l, 10.0);
        let events = page.take_events();
        assert!(matches!(events.as_slice(), [PageEvent::ControlMoved(_)]));
        assert!(page.evasion.bounds(&l).contains(page.evasion.position));
    }

    #[test]
    fn test_touch_without_contact_is_ignored() {
        let mut page = loaded_page(5);
        page.handle(InputEvent::TouchStart(None), &layout(), 10.0);
        page.handle(InputEvent::TouchMove(None), &layout(), 11.0);
        assert!(page.take_events().is_empty());
    }

    #[test]
    fn test_touch_uses_contact_point() {
        let mut page = loaded_page(6);
        let l = layout();
        let center = l.container.origin + page.evasion.center(&l);
        page.handle(InputEvent::TouchStart(Some(center)), &l, 10.0);
        assert_eq!(page.take_events().len(), 1);
    }

    #[test]
    fn test_reject_click_flow() {
        let mut page = loaded_page(7);
        page.handle(InputEvent::RejectClick, &layout(), 100.0);
        page.handle(InputEvent::RejectClick, &layout(), 200.0);
        let events = page.take_events();
        assert_eq!(events.len(), 6);
        assert!(matches!(events[3], PageEvent::ControlMoved(_)));
        match events[4] {
            PageEvent::AcceptScaled(s) => assert!((s - 1.12).abs() < 1e-6),
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(events[5], PageEvent::StatusChanged(HINT_REJECTED));

        page.advance_clock(1399.0, 1280.0);
        assert!(!page.take_events().contains(&PageEvent::StatusChanged(HINT_DEFAULT)));
        page.advance_clock(1400.0, 1280.0);
        assert!(page.take_events().contains(&PageEvent::StatusChanged(HINT_DEFAULT)));
    }

    #[test]
    fn test_resize_replaces_randomly() {
        let mut page = loaded_page(8);
        let mut l = layout();
        l.container.size = Vec2::new(300.0, 100.0);
        page.handle(InputEvent::Resize, &l, 50.0);
        assert!(matches!(page.take_events().as_slice(), [PageEvent::ControlMoved(_)]));
        assert!(page.evasion.bounds(&l).contains(page.evasion.position));
    }

    #[test]
    fn test_accept_sequence() {
        let mut page = loaded_page(9);
        page.handle(InputEvent::AcceptClick, &layout(), 1000.0);
        assert_eq!(
            page.take_events(),
            vec![PageEvent::Accepted, PageEvent::StatusChanged(HINT_ACCEPTED)]
        );
        assert_eq!(page.particles.len(), 90);
        assert!(page.particles.particles().iter().all(|p| p.pos == Vec2::new(270.0, 342.0)));

        page.frame(1100.0, 1280.0);
        assert_eq!(page.particles.len(), 90);
        page.frame(1160.0, 1280.0);
        assert_eq!(page.particles.len(), 145);
        page.frame(1260.0, 1280.0);
        assert_eq!(page.particles.len(), 200);

        // Everything has faded 160 frames after the last burst
        let mut t = 1260.0;
        for _ in 0..160 {
            t += FRAME_MS;
            page.frame(t, 1280.0);
        }
        assert!(page.particles.is_empty());
        assert_eq!(page.particles.take_despawned().len(), 200);
    }

    #[test]
    fn test_inputs_after_accept() {
        let mut page = loaded_page(10);
        page.handle(InputEvent::AcceptClick, &layout(), 0.0);
        page.take_events();

        let before = page.evasion.position;
        let l = layout();
        let center = l.container.origin + page.evasion.center(&l);
        page.handle(InputEvent::PointerMove(center), &l, 1.0);
        page.handle(InputEvent::RejectClick, &l, 2.0);
        page.handle(InputEvent::Resize, &l, 3.0);
        assert!(page.take_events().is_empty());
        assert_eq!(page.evasion.position, before);
        assert_eq!(page.prompt.rejections(), 0);
    }

    #[test]
    fn test_same_seed_same_choreography() {
        let mut a = loaded_page(99);
        let mut b = loaded_page(99);
        for page in [&mut a, &mut b] {
            page.handle(InputEvent::RejectClick, &layout(), 10.0);
            page.handle(InputEvent::AcceptClick, &layout(), 20.0);
            page.frame(30.0, 1280.0);
        }
        assert_eq!(a.seed(), 99);
        assert_eq!(a.evasion.position, b.evasion.position);
        assert_eq!(a.ambient.sprites(), b.ambient.sprites());
        let pa: Vec<Vec2> = a.particles.particles().iter().map(|p| p.pos).collect();
        let pb: Vec<Vec2> = b.particles.particles().iter().map(|p| p.pos).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_flash_status_emits_and_reverts() {
        let mut page = loaded_page(11);
        page.flash_status("music", 0.0, 2500.0);
        assert_eq!(page.take_events(), vec![PageEvent::StatusChanged("music")]);
        page.advance_clock(2500.0, 1280.0);
        assert_eq!(page.take_events(), vec![PageEvent::StatusChanged(HINT_DEFAULT)]);
    }

    #[test]
    fn test_late_input_does_not_rewind_clock() {
        let mut page = loaded_page(13);
        page.advance_clock(5000.0, 1280.0);
        // Reject stamped earlier than the last frame
        page.handle(InputEvent::RejectClick, &layout(), 1000.0);
        page.take_events();

        page.advance_clock(6199.0, 1280.0);
        assert!(page.take_events().is_empty());
        assert_eq!(page.prompt.status(), HINT_REJECTED);

        page.advance_clock(6200.0, 1280.0);
        assert_eq!(page.take_events(), vec![PageEvent::StatusChanged(HINT_DEFAULT)]);
    }
}
