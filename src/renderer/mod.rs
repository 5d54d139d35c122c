//! DOM rendering module
//!
//! Sprites are plain elements positioned with inline styles. Burst particles
//! are moved every frame; background hearts are animated by CSS and only
//! created and removed here.

pub mod style;

#[cfg(target_arch = "wasm32")]
pub mod sprites;

#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;

#[cfg(target_arch = "wasm32")]
mod dom {
    use wasm_bindgen::JsValue;
    use web_sys::{Document, Element};

    use super::sprites::SpriteLayer;
    use super::style;
    use crate::sim::PageState;

    /// Mirrors simulation sprites into the page
    pub struct DomRenderer {
        bursts: SpriteLayer,
        hearts: SpriteLayer,
    }

    impl DomRenderer {
        /// Burst particles go under `burst_parent`, background hearts under
        /// `heart_parent`
        pub fn new(document: &Document, burst_parent: Element, heart_parent: Element) -> Self {
            Self {
                bursts: SpriteLayer::new(document.clone(), burst_parent, "confetti"),
                hearts: SpriteLayer::new(document.clone(), heart_parent, "bg-heart"),
            }
        }

        /// Sync both layers with the current state
        pub fn render(&mut self, page: &mut PageState) -> Result<(), JsValue> {
            for id in page.particles.take_despawned() {
                self.bursts.remove(id);
            }
            for p in page.particles.particles() {
                let el = self.bursts.ensure(p.id, p.glyph)?;
                let css = el.style();
                css.set_property("transform", &style::particle_transform(p))?;
                css.set_property("opacity", &style::particle_opacity(p))?;
            }

            for id in page.ambient.take_despawned() {
                self.hearts.remove(id);
            }
            for id in page.ambient.take_spawned() {
                // Spawned and expired within the same clock step
                let Some(sprite) = page.ambient.sprite(id) else { continue };
                let el = self.hearts.ensure(sprite.id, sprite.glyph)?;
                let css = el.style();
                for (name, value) in style::ambient_properties(sprite) {
                    css.set_property(name, &value)?;
                }
            }

            Ok(())
        }
    }
}
