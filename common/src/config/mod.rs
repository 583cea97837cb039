//! Face configuration.
//!
//! - `layout`: Glyph sizes and positions of the clock row
//! - `timing`: Interactive update rate and tick alignment

pub mod layout;
pub mod timing;

use embedded_graphics::pixelcolor::Rgb565;

pub use layout::{
    CLOCK_TOP,
    COLON_WIDTH,
    ClockLayout,
    DIGIT_HEIGHT,
    DIGIT_WIDTH,
    LEFT_MARGIN,
    SPACER_WIDTH,
};
pub use timing::{INTERACTIVE_UPDATE_RATE_MS, next_tick_delay_ms};

use crate::clock::HourFormat;
use crate::colors::BLACK;

/// Default right shift applied to each color channel of a glyph in mute mode.
/// A shift of 1 halves the intensity.
pub const MUTED_DIM_SHIFT: u8 = 1;

/// Everything the renderer needs besides assets, time, mode and bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceConfig {
    /// Clock row geometry.
    pub layout: ClockLayout,
    /// How the hour field is expanded to digits.
    pub hour_format: HourFormat,
    /// Ambient background when no gray variant is available.
    pub ambient_fill: Rgb565,
    /// Per-channel right shift for glyphs in mute mode.
    pub muted_dim_shift: u8,
}

impl FaceConfig {
    pub const fn new() -> Self {
        Self {
            layout: ClockLayout::new(),
            hour_format: HourFormat::TwentyFour,
            ambient_fill: BLACK,
            muted_dim_shift: MUTED_DIM_SHIFT,
        }
    }

    /// Same configuration with a different hour format.
    pub const fn with_hour_format(
        mut self,
        hour_format: HourFormat,
    ) -> Self {
        self.hour_format = hour_format;
        self
    }
}

impl Default for FaceConfig {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FaceConfig::default();
        assert_eq!(config.hour_format, HourFormat::TwentyFour);
        assert_eq!(config.ambient_fill, BLACK);
        assert_eq!(config.layout, ClockLayout::new());
    }

    #[test]
    fn test_with_hour_format() {
        let config = FaceConfig::new().with_hour_format(HourFormat::Twelve);
        assert_eq!(config.hour_format, HourFormat::Twelve);
        assert_eq!(config.muted_dim_shift, MUTED_DIM_SHIFT);
    }
}
