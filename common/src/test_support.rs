//! Fixtures shared by the unit tests.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::bitmap::Bitmap;
use crate::colors::{GLYPH_KEY, LED_OFF, LED_RED};
use crate::glyphs::{Digit, GlyphSet};

/// Color marking digit `value` in [`marked_glyphs`].
pub fn digit_color(value: u8) -> Rgb565 { Rgb565::new(value + 1, 0, 0) }

pub const COLON_COLOR: Rgb565 = Rgb565::new(0, 63, 0);
pub const AM_COLOR: Rgb565 = Rgb565::new(0, 0, 31);
pub const PM_COLOR: Rgb565 = Rgb565::new(0, 0, 15);
pub const BLANK_COLOR: Rgb565 = Rgb565::new(0, 10, 0);

/// Glyph set where each image has a distinct width so lookups are checkable.
pub fn sized_glyphs() -> GlyphSet {
    let digits = core::array::from_fn(|i| Bitmap::filled(Size::new(10 + i as u32, 20), Rgb565::RED));
    GlyphSet::new(
        digits,
        Bitmap::filled(Size::new(5, 20), Rgb565::RED),
        Bitmap::filled(Size::new(30, 20), Rgb565::RED),
        Bitmap::filled(Size::new(31, 20), Rgb565::RED),
    )
}

/// Solid glyphs whose color identifies them, with a blank spacer.
///
/// Native digit width is 20 px, so a suppressed leading digit shifts the
/// cursor by 10 px.
pub fn marked_glyphs() -> GlyphSet {
    let digits = core::array::from_fn(|i| Bitmap::filled(Size::new(20, 26), digit_color(i as u8)));
    GlyphSet::new(
        digits,
        Bitmap::filled(Size::new(14, 26), COLON_COLOR),
        Bitmap::filled(Size::new(20, 26), AM_COLOR),
        Bitmap::filled(Size::new(20, 26), PM_COLOR),
    )
    .with_blank(Bitmap::filled(Size::new(15, 26), BLANK_COLOR))
}

/// Solid lit LED glyphs with an unlit spacer, keyed like real LED art.
pub fn led_glyphs() -> GlyphSet {
    let lit = |width| Bitmap::filled(Size::new(width, 26), LED_RED);
    GlyphSet::new(core::array::from_fn(|_| lit(20)), lit(14), lit(20), lit(20))
        .with_blank(Bitmap::filled(Size::new(15, 26), LED_OFF))
        .with_color_key(GLYPH_KEY)
}

/// Colorful background: a left/right split so scaling and desaturation are visible.
pub fn split_background() -> Bitmap {
    let pixels = (0..8u32)
        .flat_map(|_| (0..8u32).map(|x| if x < 4 { Rgb565::new(31, 40, 0) } else { Rgb565::new(0, 20, 31) }))
        .collect();
    Bitmap::from_pixels(8, pixels).unwrap()
}

/// Digit whose color is found at `color`, if any.
pub fn digit_for_color(color: Rgb565) -> Option<Digit> { (0..10).find(|&v| digit_color(v) == color).and_then(Digit::new) }
