//! Seamless horizontal marquee loops with velocity-reactive playback.
//!
//! The crate turns a measured row of variable-width items into an infinitely
//! repeating strip animation. [`HorizontalLoop`] owns the loop math: per-item
//! motion tracks, the loop period, index navigation and the frame-driven
//! playhead. [`ScrollObserver`] shapes the loop's play rate in response to
//! scroll/flick velocity samples. [`Marquee`] wires the two together the way
//! a host component would, and `src/main.rs` is a small raylib host that
//! measures text items, feeds mouse-wheel samples and draws the strip.

pub mod clock;
pub mod constants;
pub mod horizontal_loop;
pub mod item;
pub mod marquee;
pub mod measure;
pub mod observer;

pub use clock::Clock;
pub use horizontal_loop::{HorizontalLoop, LoopConfig, NavHandle, NavOptions, Snap};
pub use item::{Item, ItemMeasure};
pub use marquee::{Marquee, MarqueeConfig};
pub use observer::{ObserverConfig, ScrollObserver};

/// Result type for marquee operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised when building a loop from measured geometry
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot build a loop from an empty item set")]
    EmptyItemSet,

    #[error("item {index} has invalid width {width}")]
    InvalidWidth { index: usize, width: f32 },

    #[error("invalid speed {0} px/s, must be positive and finite")]
    InvalidSpeed(f32),
}
