//! No Escape entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::Event;

    use no_escape::Tuning;
    use no_escape::audio::MusicPlayer;
    use no_escape::consts::HINT_MUSIC_BLOCKED;
    use no_escape::platform::dom::Elements;
    use no_escape::platform::input::{listen, mouse_point, touch_point};
    use no_escape::platform::time::{now_ms, session_seed};
    use no_escape::renderer::DomRenderer;
    use no_escape::sim::{InputEvent, PageState};

    /// Page instance holding all state
    struct App {
        page: PageState,
        elements: Elements,
        renderer: DomRenderer,
        tuning: Tuning,
    }

    impl App {
        /// Feed one input event through the simulation
        fn dispatch(&mut self, event: InputEvent) {
            let layout = self.elements.measure();
            self.page.handle(event, &layout, now_ms());
            self.flush();
        }

        /// Apply queued page events to the DOM
        fn flush(&mut self) {
            for event in self.page.take_events() {
                self.elements.apply(&event);
            }
        }

        /// One animation frame
        fn frame(&mut self, time: f64) {
            let viewport_width = self.elements.measure().viewport.x;
            self.page.frame(time, viewport_width);
            self.flush();
            if let Err(e) = self.renderer.render(&mut self.page) {
                log::warn!("Render error: {:?}", e);
            }
        }

        fn music_blocked(&mut self) {
            let hint_ms = self.tuning.prompt.music_hint_ms;
            self.page.flash_status(HINT_MUSIC_BLOCKED, now_ms(), hint_ms);
            self.flush();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        log::info!("No Escape starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let elements = Elements::lookup(window)?;
        let tuning = Tuning::load();

        let seed = session_seed();
        let renderer = DomRenderer::new(
            &elements.document,
            elements.body.clone().into(),
            elements.background.clone().into(),
        );
        let music = MusicPlayer::find(&elements.document);

        let app = Rc::new(RefCell::new(App {
            page: PageState::new(seed, &tuning),
            elements,
            renderer,
            tuning,
        }));
        log::info!("Page initialized with seed: {}", seed);

        setup_input_handlers(&app)?;
        if let Some(music) = music {
            setup_music(&app, music)?;
        }

        // Module scripts run after parsing, so this is our load
        app.borrow_mut().dispatch(InputEvent::Load);

        request_animation_frame(app);

        log::info!("No Escape running!");
        Ok(())
    }

    fn setup_input_handlers(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
        let (window, container, reject, accept) = {
            let a = app.borrow();
            (
                a.elements.window.clone(),
                a.elements.container.clone(),
                a.elements.reject.clone(),
                a.elements.accept.clone(),
            )
        };

        // Mouse dodge
        {
            let app = app.clone();
            listen(&container, "mousemove", false, move |event: Event| {
                if let Some(p) = mouse_point(&event) {
                    app.borrow_mut().dispatch(InputEvent::PointerMove(p));
                }
            })?;
        }

        // Touch dodge (first contact only)
        {
            let app = app.clone();
            listen(&container, "touchstart", true, move |event: Event| {
                app.borrow_mut()
                    .dispatch(InputEvent::TouchStart(touch_point(&event)));
            })?;
        }
        {
            let app = app.clone();
            listen(&container, "touchmove", true, move |event: Event| {
                app.borrow_mut()
                    .dispatch(InputEvent::TouchMove(touch_point(&event)));
            })?;
        }

        // If somehow clicked
        {
            let app = app.clone();
            listen(&reject, "click", false, move |event: Event| {
                event.prevent_default();
                app.borrow_mut().dispatch(InputEvent::RejectClick);
            })?;
        }

        {
            let app = app.clone();
            listen(&accept, "click", false, move |_event: Event| {
                app.borrow_mut().dispatch(InputEvent::AcceptClick);
            })?;
        }

        {
            let app = app.clone();
            listen(&window, "resize", true, move |_event: Event| {
                app.borrow_mut().dispatch(InputEvent::Resize);
            })?;
        }

        Ok(())
    }

    fn setup_music(app: &Rc<RefCell<App>>, music: MusicPlayer) -> Result<(), JsValue> {
        let on_blocked = {
            let app = app.clone();
            move || app.borrow_mut().music_blocked()
        };

        if let Some(button) = music.button().cloned() {
            let app = app.clone();
            let player = music.clone();
            listen(&button, "click", false, move |_event: Event| {
                let app = app.clone();
                player.try_play(move || app.borrow_mut().music_blocked());
            })?;
        }

        music.try_play(on_blocked);
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    if let Err(e) = wasm_page::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("No Escape (native) starting...");
    log::info!("The page runs in the browser - build with `trunk serve` for the web version");

    println!("\nRunning headless choreography...");
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive one page session with a scripted pointer and print what happened
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use glam::Vec2;
    use no_escape::Tuning;
    use no_escape::sim::{InputEvent, Layout, PageState, Rect};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let tuning = Tuning::load();
    let layout = Layout {
        container: Rect::new(340.0, 420.0, 600.0, 140.0),
        control_size: Vec2::new(96.0, 48.0),
        accept: Rect::new(360.0, 440.0, 110.0, 48.0),
        viewport: Vec2::new(1280.0, 800.0),
    };

    let mut page = PageState::new(7, &tuning);
    page.handle(InputEvent::Load, &layout, 0.0);
    println!("✓ Session seeded with {}", page.seed());

    // Sweep the pointer across the container, chasing the control
    let mut t = 0.0;
    let mut dodges = 0;
    for _ in 0..120 {
        t += FRAME_MS;
        let target = layout.container.origin + page.evasion.center(&layout);
        page.handle(InputEvent::PointerMove(target - Vec2::new(40.0, 0.0)), &layout, t);
        dodges += page
            .take_events()
            .iter()
            .filter(|e| matches!(e, no_escape::sim::PageEvent::ControlMoved(_)))
            .count();
        page.frame(t, layout.viewport.x);
    }
    println!("✓ Control dodged {} times, now at {:?}", dodges, page.evasion.position);

    page.handle(InputEvent::RejectClick, &layout, t);
    page.handle(InputEvent::AcceptClick, &layout, t);
    println!("✓ Accepted after {} rejection(s), {} hearts in flight", page.prompt.rejections(), page.particles.len());

    while !page.particles.is_empty() || page.frames() < 400 {
        t += FRAME_MS;
        page.frame(t, layout.viewport.x);
    }
    println!(
        "✓ Bursts settled after {} frames; {} background hearts spawned so far",
        page.frames(),
        page.ambient.spawned_total()
    );
}
