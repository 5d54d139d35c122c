//! Host clock

/// Milliseconds on the same timeline as `requestAnimationFrame` timestamps
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Seed for a page session
pub fn session_seed() -> u64 {
    js_sys::Date::now() as u64
}
