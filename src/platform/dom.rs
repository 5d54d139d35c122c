//! Page elements and layout measurement
//!
//! Elements are looked up once per session. Their geometry is measured fresh
//! for every event and frame.

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::renderer::style;
use crate::sim::{Layout, PageEvent, Rect};

/// Handles to every element the page choreography touches
pub struct Elements {
    pub window: Window,
    pub document: Document,
    pub body: HtmlElement,
    /// Area the reject control moves inside
    pub container: HtmlElement,
    pub reject: HtmlElement,
    pub accept: HtmlElement,
    pub result: HtmlElement,
    pub hint: HtmlElement,
    /// Parent for background hearts
    pub background: HtmlElement,
}

/// Look up a required element by id
fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{} has the wrong type", id)))
}

fn rect_of(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

impl Elements {
    pub fn lookup(window: Window) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;

        Ok(Self {
            container: by_id(&document, "actions")?,
            reject: by_id(&document, "noBtn")?,
            accept: by_id(&document, "yesBtn")?,
            result: by_id(&document, "result")?,
            hint: by_id(&document, "hint")?,
            background: by_id(&document, "bg")?,
            body,
            document,
            window,
        })
    }

    /// Measure the page right now
    pub fn measure(&self) -> Layout {
        let viewport = Vec2::new(
            self.window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as f32,
            self.window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as f32,
        );

        Layout {
            container: rect_of(&self.container),
            control_size: rect_of(&self.reject).size,
            accept: rect_of(&self.accept),
            viewport,
        }
    }

    /// Mirror one simulation event into the page
    pub fn apply(&self, event: &PageEvent) {
        let result = match *event {
            PageEvent::ControlMoved(pos) => {
                let css = self.reject.style();
                css.set_property("left", &style::px(pos.x))
                    .and_then(|_| css.set_property("top", &style::px(pos.y)))
            }
            PageEvent::AcceptScaled(scale) => self
                .accept
                .style()
                .set_property("transform", &style::scale_transform(scale)),
            PageEvent::StatusChanged(text) => {
                self.hint.set_text_content(Some(text));
                Ok(())
            }
            PageEvent::Accepted => self
                .reject
                .style()
                .set_property("display", "none")
                .and_then(|_| self.result.style().set_property("display", "block")),
        };

        if let Err(e) = result {
            log::warn!("Failed to apply {:?}: {:?}", event, e);
        }
    }
}
