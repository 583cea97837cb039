//! Glyph asset table.
//!
//! Ten digit images, a colon and the AM/PM pair are loaded once and never
//! change. Digit lookups only accept a [`Digit`], so the table index is
//! bounds-checked when the digit is constructed rather than trusted from
//! string formatting.

use embedded_graphics::pixelcolor::Rgb565;

use crate::bitmap::Bitmap;
use crate::clock::Meridiem;

/// Number of digit glyphs.
pub const DIGIT_COUNT: usize = 10;

// =============================================================================
// Digit
// =============================================================================

/// A decimal digit, `0..=9`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Self = Self(0);

    /// `None` if `value > 9`.
    #[inline]
    pub const fn new(value: u8) -> Option<Self> { if value < DIGIT_COUNT as u8 { Some(Self(value)) } else { None } }

    /// Parse an ASCII digit character.
    #[inline]
    pub const fn from_ascii(byte: u8) -> Option<Self> {
        if byte.is_ascii_digit() { Some(Self(byte - b'0')) } else { None }
    }

    #[inline]
    pub const fn value(self) -> u8 { self.0 }

    #[inline]
    pub const fn is_zero(self) -> bool { self.0 == 0 }
}

// =============================================================================
// Glyph Identity
// =============================================================================

/// Every image the clock row can contain.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlyphId {
    Digit(Digit),
    Colon,
    /// Unlit cell in front of a non-zero leading hour digit.
    Blank,
    Meridiem(Meridiem),
}

// =============================================================================
// Glyph Set
// =============================================================================

/// Pre-rasterized glyph images, keyed by [`GlyphId`].
#[derive(Clone, Debug)]
pub struct GlyphSet {
    digits: [Bitmap; DIGIT_COUNT],
    colon: Bitmap,
    meridiem: [Bitmap; 2],
    blank: Option<Bitmap>,
    color_key: Option<Rgb565>,
}

impl GlyphSet {
    /// Table without a blank spacer and without a transparent color.
    pub fn new(
        digits: [Bitmap; DIGIT_COUNT],
        colon: Bitmap,
        am: Bitmap,
        pm: Bitmap,
    ) -> Self {
        Self {
            digits,
            colon,
            meridiem: [am, pm],
            blank: None,
            color_key: None,
        }
    }

    /// Add the unlit spacer glyph.
    #[must_use]
    pub fn with_blank(
        mut self,
        blank: Bitmap,
    ) -> Self {
        self.blank = Some(blank);
        self
    }

    /// Treat pixels of `key` as transparent when drawing.
    #[must_use]
    pub fn with_color_key(
        mut self,
        key: Rgb565,
    ) -> Self {
        self.color_key = Some(key);
        self
    }

    #[inline]
    pub fn digit(
        &self,
        digit: Digit,
    ) -> &Bitmap {
        &self.digits[usize::from(digit.value())]
    }

    #[inline]
    pub fn meridiem(
        &self,
        meridiem: Meridiem,
    ) -> &Bitmap {
        &self.meridiem[meridiem.index()]
    }

    /// Image for `id`. Only [`GlyphId::Blank`] can be missing.
    pub fn get(
        &self,
        id: GlyphId,
    ) -> Option<&Bitmap> {
        match id {
            GlyphId::Digit(digit) => Some(self.digit(digit)),
            GlyphId::Colon => Some(&self.colon),
            GlyphId::Blank => self.blank.as_ref(),
            GlyphId::Meridiem(meridiem) => Some(self.meridiem(meridiem)),
        }
    }

    #[inline]
    pub const fn color_key(&self) -> Option<Rgb565> { self.color_key }
}

// =============================================================================
// Unit Tests
// =============================================================================
