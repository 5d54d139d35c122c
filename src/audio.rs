//! Background music
//!
//! Browsers may refuse to start audio without a user gesture. When autoplay
//! is blocked a fallback button appears; clicking it retries, and it hides
//! itself as soon as playback succeeds.

/// Playback status as far as the page knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing attempted yet
    #[default]
    Idle,
    Playing,
    /// The browser rejected the last attempt
    Blocked,
}

/// Decides when the fallback control is shown
#[derive(Debug, Clone, Default)]
pub struct PlaybackGate {
    state: PlaybackState,
}

impl PlaybackGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The fallback control is visible only while blocked
    pub fn fallback_visible(&self) -> bool {
        self.state == PlaybackState::Blocked
    }

    pub fn record_success(&mut self) {
        if self.state != PlaybackState::Playing {
            log::info!("Music playing");
        }
        self.state = PlaybackState::Playing;
    }

    /// Returns true if this failure newly blocked playback
    pub fn record_failure(&mut self) -> bool {
        let newly_blocked = self.state != PlaybackState::Blocked;
        if newly_blocked {
            log::info!("Music autoplay blocked, showing fallback");
        }
        self.state = PlaybackState::Blocked;
        newly_blocked
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::MusicPlayer;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlAudioElement, HtmlElement};

    use super::PlaybackGate;

    /// Id of the optional `<audio>` element
    const AUDIO_ID: &str = "bgm";
    /// Id of the manual start button
    const BUTTON_ID: &str = "musicBtn";

    /// Background track plus its fallback button
    #[derive(Clone)]
    pub struct MusicPlayer {
        audio: HtmlAudioElement,
        button: Option<HtmlElement>,
        gate: Rc<RefCell<PlaybackGate>>,
    }

    impl MusicPlayer {
        /// `None` if the page has no music
        pub fn find(document: &Document) -> Option<Self> {
            let audio = document
                .get_element_by_id(AUDIO_ID)?
                .dyn_into::<HtmlAudioElement>()
                .ok()?;
            let button = document
                .get_element_by_id(BUTTON_ID)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if button.is_none() {
                log::warn!("#{} found without #{}", AUDIO_ID, BUTTON_ID);
            }
            Some(Self {
                audio,
                button,
                gate: Rc::new(RefCell::new(PlaybackGate::new())),
            })
        }

        pub fn button(&self) -> Option<&HtmlElement> {
            self.button.as_ref()
        }

        /// Attempt playback. Runs as a separate task; `on_blocked` is called
        /// once each time playback becomes blocked.
        pub fn try_play(&self, on_blocked: impl FnOnce() + 'static) {
            let player = self.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let ok = match player.audio.play() {
                    Ok(promise) => JsFuture::from(promise).await.is_ok(),
                    Err(_) => false,
                };

                let newly_blocked = {
                    let mut gate = player.gate.borrow_mut();
                    if ok {
                        gate.record_success();
                        false
                    } else {
                        gate.record_failure()
                    }
                };
                player.sync_button();
                if newly_blocked {
                    on_blocked();
                }
            });
        }

        fn sync_button(&self) {
            let Some(button) = &self.button else { return };
            let display = if self.gate.borrow().fallback_visible() {
                "inline-block"
            } else {
                "none"
            };
            let _ = button.style().set_property("display", display);
        }
    }
}
