//! Platform-agnostic core of the LED watch face.
//!
//! This crate contains everything that does not depend on a particular host:
//!
//! - [`bitmap`]: Owned RGB565 rasters, scaling and desaturation
//! - [`glyphs`]: Digit/symbol glyph table indexed by validated [`Digit`]s
//! - [`clock`]: Clock readings and fixed-width time text
//! - [`layout`]: Layout cursor and per-frame glyph placement plan
//! - [`background`]: Surface-sized background cache (scaled + gray)
//! - [`mode`]: Display mode state machine and host display properties
//! - [`render`]: The frame renderer (pure function of time, mode and bounds)
//! - [`timer`]: Update timer abstraction and a deadline-polled implementation
//! - [`engine`]: Host-event adapter tying lifecycle callbacks to the renderer
//! - [`config`]: Layout and timing constants, face configuration
//! - [`colors`]: RGB565 color constants
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` + `alloc`. Bitmaps need heap storage; everything
//! else (time text, layout plans) uses fixed-capacity `heapless` containers.
//!
//! # Testing
//!
//! ```bash
//! cargo test -p ledwatch-common
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

extern crate alloc;

pub mod background;
pub mod bitmap;
pub mod clock;
pub mod colors;
pub mod config;
pub mod engine;
pub mod glyphs;
pub mod layout;
pub mod mode;
pub mod render;
pub mod timer;

#[cfg(test)]
mod test_support;

// Re-export commonly used items
pub use bitmap::{Bitmap, BitmapError};
pub use clock::{ClockReading, HourFormat, Meridiem};
pub use config::FaceConfig;
pub use engine::{EngineResponse, HostEvent, Notification, TapType, WatchFaceEngine};
pub use glyphs::{Digit, GlyphId, GlyphSet};
pub use mode::{DisplayMode, DisplayProperties, InterruptionFilter};
pub use render::FrameRenderer;
pub use timer::{DeadlineTimer, UpdateTimer};
