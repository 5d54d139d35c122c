//! Platform abstraction layer
//!
//! Browser glue between the DOM and the simulation:
//! - Element lookup and layout measurement
//! - Input event registration
//! - Time

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod time;
