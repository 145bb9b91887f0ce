//! Platform abstraction layer
//!
//! Scoreboard overlay state plus its browser bindings. Native builds drive
//! the engine directly (see `demo`).

pub mod overlay;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use overlay::Overlay;

/// DOM element ids the overlay writes scores into
pub const RED_SCORE_ELEMENT: &str = "red-score";
pub const BLUE_SCORE_ELEMENT: &str = "blue-score";
