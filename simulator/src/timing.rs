//! Timing constants for the simulator.
//!
//! These use `std::time::Duration`, which the `no_std` core does not have.

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// How long a tap toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(2);
