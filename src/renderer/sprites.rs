//! DOM sprite layers
//!
//! Each sprite is a `<div>` holding one emoji, keyed by simulation id.

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

/// A set of sprite elements under one parent
pub struct SpriteLayer {
    document: Document,
    parent: Element,
    class: &'static str,
    elements: HashMap<u32, HtmlElement>,
}

impl SpriteLayer {
    pub fn new(document: Document, parent: Element, class: &'static str) -> Self {
        Self {
            document,
            parent,
            class,
            elements: HashMap::new(),
        }
    }

    /// Create the element for `id` if it does not exist yet
    pub fn ensure(&mut self, id: u32, glyph: &str) -> Result<&HtmlElement, JsValue> {
        if !self.elements.contains_key(&id) {
            let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
            el.set_class_name(self.class);
            el.set_text_content(Some(glyph));
            self.parent.append_child(&el)?;
            self.elements.insert(id, el);
        }
        self.elements
            .get(&id)
            .ok_or_else(|| JsValue::from_str("sprite vanished"))
    }

    /// Remove the element for `id` from the page
    pub fn remove(&mut self, id: u32) {
        if let Some(el) = self.elements.remove(&id) {
            el.remove();
        }
    }
}
