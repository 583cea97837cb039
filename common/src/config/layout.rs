//! Clock row geometry.
//!
//! All glyphs are scaled to a fixed target size before drawing, so the row
//! geometry does not depend on the resolution of the glyph assets. The
//! numbers match a 400x400 round panel; the row is 390 px wide when the
//! leading hour digit is shown.

use embedded_graphics::geometry::Size;

// =============================================================================
// Clock Row Constants
// =============================================================================

/// Initial layout cursor position in pixels.
pub const LEFT_MARGIN: i32 = 3;

/// Width of the unlit spacer cell drawn before a non-zero leading hour digit.
pub const SPACER_WIDTH: u32 = 30;

/// Target width of digit and AM/PM glyphs.
pub const DIGIT_WIDTH: u32 = 43;

/// Target height of every glyph in the row.
pub const DIGIT_HEIGHT: u32 = 53;

/// Target width of the colon separator.
pub const COLON_WIDTH: u32 = 28;

/// Vertical offset of the clock row.
pub const CLOCK_TOP: i32 = 130;

const _: () = assert!(DIGIT_WIDTH > 0 && DIGIT_HEIGHT > 0);
const _: () = assert!(COLON_WIDTH > 0 && SPACER_WIDTH > 0);

/// Clock row geometry with the constants above as defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockLayout {
    pub left_margin: i32,
    pub top: i32,
    pub spacer_width: u32,
    pub digit_size: Size,
    pub colon_width: u32,
}

impl ClockLayout {
    pub const fn new() -> Self {
        Self {
            left_margin: LEFT_MARGIN,
            top: CLOCK_TOP,
            spacer_width: SPACER_WIDTH,
            digit_size: Size::new(DIGIT_WIDTH, DIGIT_HEIGHT),
            colon_width: COLON_WIDTH,
        }
    }

    /// Target size of the spacer cell.
    #[inline]
    pub const fn spacer_size(&self) -> Size { Size::new(self.spacer_width, self.digit_size.height) }

    /// Target size of a colon.
    #[inline]
    pub const fn colon_size(&self) -> Size { Size::new(self.colon_width, self.digit_size.height) }
}

impl Default for ClockLayout {
    fn default() -> Self { Self::new() }
}
