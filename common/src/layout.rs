//! Clock row layout.
//!
//! Glyphs are placed left to right by a [`LayoutCursor`] that advances by
//! each glyph's scaled width. The result is a [`ClockPlan`]: an ordered list
//! of placements the renderer walks once.
//!
//! # Row Composition
//!
//! ```text
//! [blank][H][H] [:] [M][M] [:] [S][S] [AM|PM]
//! ```
//!
//! The leading hour digit has two shapes:
//!
//! - **Non-zero**: the blank spacer cell is placed at the left margin, then
//!   the digit.
//! - **Zero**: the digit is suppressed. The cursor jumps to minus half of
//!   the digit's native width and still advances past the suppressed slot,
//!   which pulls the remaining glyphs left. Suppressed glyphs stay in the
//!   plan as invisible placements.

use embedded_graphics::geometry::{Point, Size};
use heapless::Vec;

use crate::clock::{Meridiem, TimeText, text_pos};
use crate::config::ClockLayout;
use crate::glyphs::{Digit, GlyphId, GlyphSet};

/// Upper bound on placements in one row (blank + 6 digits + 2 colons + AM/PM).
pub const MAX_PLACEMENTS: usize = 10;

// =============================================================================
// Layout Cursor
// =============================================================================

/// Running horizontal offset while a row is laid out.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LayoutCursor {
    x: i32,
}

impl LayoutCursor {
    #[inline]
    pub const fn new(x: i32) -> Self { Self { x } }

    #[inline]
    pub const fn x(&self) -> i32 { self.x }

    /// Move past a glyph of `width` pixels.
    #[inline]
    pub fn advance(
        &mut self,
        width: u32,
    ) {
        self.x += width as i32;
    }

    /// Jump to an absolute position.
    #[inline]
    pub fn jump_to(
        &mut self,
        x: i32,
    ) {
        self.x = x;
    }
}

// =============================================================================
// Placement
// =============================================================================

/// One glyph slot in the row.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Placement {
    pub glyph: GlyphId,
    /// Top-left corner on the surface.
    pub origin: Point,
    /// Scaled size.
    pub size: Size,
    /// `false` for suppressed slots and for a blank spacer with no image.
    pub visible: bool,
}

// =============================================================================
// Clock Plan
// =============================================================================

/// Ordered glyph placements for one frame.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ClockPlan {
    placements: Vec<Placement, MAX_PLACEMENTS>,
    end_x: i32,
}

impl ClockPlan {
    /// Lay out `text` (`HH:MM:SS`) followed by the `meridiem` glyph.
    ///
    /// # Panics
    ///
    /// If a digit position of `text` does not hold an ASCII digit. The time
    /// text is zero-padded by construction, so this is a programming error.
    pub fn new(
        text: &TimeText,
        meridiem: Meridiem,
        layout: &ClockLayout,
        glyphs: &GlyphSet,
    ) -> Self {
        let mut plan = Self::default();
        let mut cursor = LayoutCursor::new(layout.left_margin);
        let digit_size = layout.digit_size;
        let top = layout.top;

        let lead = digit_at(text, text_pos::HOUR_TENS);
        if lead.is_zero() {
            cursor.jump_to(-(glyphs.digit(lead).width() as i32 / 2));
            plan.push(GlyphId::Digit(lead), Point::new(cursor.x(), top), digit_size, false);
            cursor.advance(digit_size.width);
        } else {
            let has_blank = glyphs.get(GlyphId::Blank).is_some();
            plan.push(GlyphId::Blank, Point::new(cursor.x(), top), layout.spacer_size(), has_blank);
            cursor.advance(layout.spacer_width);
            plan.push(GlyphId::Digit(lead), Point::new(cursor.x(), top), digit_size, true);
            cursor.advance(digit_size.width);
        }

        for pos in text_pos::HOUR_ONES..=text_pos::SECOND_ONES {
            if pos == text_pos::FIRST_COLON || pos == text_pos::SECOND_COLON {
                plan.push(GlyphId::Colon, Point::new(cursor.x(), top), layout.colon_size(), true);
                cursor.advance(layout.colon_width);
            } else {
                plan.push(GlyphId::Digit(digit_at(text, pos)), Point::new(cursor.x(), top), digit_size, true);
                cursor.advance(digit_size.width);
            }
        }

        plan.push(GlyphId::Meridiem(meridiem), Point::new(cursor.x(), top), digit_size, true);
        cursor.advance(digit_size.width);
        plan.end_x = cursor.x();
        plan
    }

    fn push(
        &mut self,
        glyph: GlyphId,
        origin: Point,
        size: Size,
        visible: bool,
    ) {
        // Capacity covers the longest row.
        self.placements
            .push(Placement {
                glyph,
                origin,
                size,
                visible,
            })
            .ok();
    }

    /// Every placement, suppressed ones included.
    #[inline]
    pub fn placements(&self) -> &[Placement] { &self.placements }

    /// Placements that produce pixels.
    pub fn drawn(&self) -> impl Iterator<Item = &Placement> { self.placements.iter().filter(|p| p.visible) }

    /// Drawn digits, left to right.
    pub fn drawn_digits(&self) -> impl Iterator<Item = Digit> + '_ {
        self.drawn().filter_map(|p| match p.glyph {
            GlyphId::Digit(digit) => Some(digit),
            _ => None,
        })
    }

    /// Digit, spacer and AM/PM slots (everything except colons), drawn or not.
    pub fn glyph_slots(&self) -> usize {
        self.placements
            .iter()
            .filter(|p| !matches!(p.glyph, GlyphId::Colon | GlyphId::Blank))
            .count()
    }

    /// Number of colon separators.
    pub fn colon_count(&self) -> usize { self.placements.iter().filter(|p| p.glyph == GlyphId::Colon).count() }

    /// Cursor position after the last glyph.
    #[inline]
    pub const fn end_x(&self) -> i32 { self.end_x }
}

/// Digit at byte `pos` of the time text.
fn digit_at(
    text: &TimeText,
    pos: usize,
) -> Digit {
    match text.as_bytes().get(pos).copied().and_then(Digit::from_ascii) {
        Some(digit) => digit,
        None => panic!("time text {:?} has no digit at position {}", text.as_str(), pos),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
